use burn::tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor};

/// Build a [batch_size, seq_length] tensor, cutting or right-padding each token list
pub fn pad_to<B: Backend>(
    pad_token: usize,
    tokens_list: Vec<Vec<usize>>,
    seq_length: usize,
    device: &B::Device,
) -> Tensor<B, 2, Int> {
    let batch_size = tokens_list.len();

    let values = tokens_list
        .into_iter()
        .flat_map(|mut tokens| {
            tokens.resize(seq_length, pad_token);
            tokens
        })
        .map(|e| (e as i64).elem())
        .collect();

    let data: Data<B::IntElem, 2> = Data::new(values, Shape::new([batch_size, seq_length]));

    Tensor::from_data(data, device)
}
