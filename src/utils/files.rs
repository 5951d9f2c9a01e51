use std::path::Path;

use tokio::{
    fs::File,
    io::{self, AsyncBufReadExt, Lines},
};

/// Read a UTF-8 text file from the given path into a list of lines
pub async fn read_file(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let mut r = file_reader(path.as_ref()).await?;
    let mut lines = Vec::new();

    while let Some(line) = r.next_line().await? {
        lines.push(line);
    }

    Ok(lines)
}

async fn file_reader(path: &Path) -> io::Result<Lines<io::BufReader<File>>> {
    let f = File::open(path).await?;

    Ok(io::BufReader::new(f).lines())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn reads_lines_without_terminators() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "A fine film.\n\nNot for me\n").unwrap();

        let lines = read_file(file.path()).await.unwrap();

        assert_eq!(lines, vec!["A fine film.", "", "Not for me"]);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();

        assert!(read_file(dir.path().join("test.txt")).await.is_err());
    }
}
