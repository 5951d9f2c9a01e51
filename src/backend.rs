//! Backend and device selection

use burn::backend::Autodiff;

#[cfg(not(feature = "tch"))]
mod selected {
    use burn::backend::{ndarray::NdArrayDevice, NdArray};

    /// The inner backend
    pub type Inner = NdArray;

    /// The CPU is the only NdArray device
    pub fn device(gpu: Option<usize>) -> NdArrayDevice {
        if let Some(index) = gpu {
            log::warn!("GPU {} requested, but the tch feature is disabled; using the CPU", index);
        }

        NdArrayDevice::Cpu
    }
}

#[cfg(feature = "tch")]
mod selected {
    use burn::backend::{libtorch::LibTorchDevice, LibTorch};

    /// The inner backend
    pub type Inner = LibTorch;

    /// A CUDA device when an index is given, otherwise the CPU
    pub fn device(gpu: Option<usize>) -> LibTorchDevice {
        match gpu {
            Some(index) => LibTorchDevice::Cuda(index),
            None => LibTorchDevice::Cpu,
        }
    }
}

pub use selected::{device, Inner};

/// The backend used for training and inference
pub type Training = Autodiff<Inner>;
