use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct MmapSource {
    mmap: Mmap,
}

impl MmapSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        // SAFETY: read-only file mapping.
        let mmap = unsafe { Mmap::map(&file) }.with_context(|| "mmap failed")?;
        Ok(Self { mmap })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Plain,
    Gzip,
}

/// Whole input, either mapped from disk or decompressed into memory.
pub enum InputBytes {
    Mapped(MmapSource),
    Owned(Vec<u8>),
}

impl InputBytes {
    pub fn open(path: &Path) -> Result<Self> {
        match detect_input_kind(path)? {
            InputKind::Plain => {
                let len = std::fs::metadata(path)
                    .with_context(|| format!("failed to stat {}", path.display()))?
                    .len();
                // zero-length files cannot be mapped on every platform
                if len == 0 {
                    return Ok(InputBytes::Owned(Vec::new()));
                }
                Ok(InputBytes::Mapped(MmapSource::open(path)?))
            }
            InputKind::Gzip => {
                let mut reader = open_gzip_reader(path)?;
                let mut buf = Vec::new();
                reader
                    .read_to_end(&mut buf)
                    .with_context(|| format!("gzip decompression error in {}", path.display()))?;
                Ok(InputBytes::Owned(buf))
            }
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            InputBytes::Mapped(source) => source.bytes(),
            InputBytes::Owned(data) => data.as_slice(),
        }
    }
}

pub fn detect_input_kind(path: &Path) -> Result<InputKind> {
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        let ext = ext.to_ascii_lowercase();
        if ext == "gz" {
            return Ok(InputKind::Gzip);
        }
    }
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut magic = [0u8; 2];
    let n = file
        .read(&mut magic)
        .with_context(|| "failed to read magic bytes")?;
    if n == 2 && magic == [0x1f, 0x8b] {
        Ok(InputKind::Gzip)
    } else {
        Ok(InputKind::Plain)
    }
}

pub fn open_gzip_reader(path: &Path) -> Result<Box<dyn Read + Send>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    #[test]
    fn plain_file_is_mapped() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello\n").unwrap();
        f.flush().unwrap();
        assert_eq!(detect_input_kind(f.path()).unwrap(), InputKind::Plain);
        let input = InputBytes::open(f.path()).unwrap();
        assert_eq!(input.bytes(), b"hello\n");
    }

    #[test]
    fn gzip_detected_by_magic() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b">>Run\n>>END_MODULE\n").unwrap();
        f.write_all(&enc.finish().unwrap()).unwrap();
        f.flush().unwrap();
        assert_eq!(detect_input_kind(f.path()).unwrap(), InputKind::Gzip);
        let input = InputBytes::open(f.path()).unwrap();
        assert_eq!(input.bytes(), b">>Run\n>>END_MODULE\n");
    }

    #[test]
    fn empty_file_reads_as_empty() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let input = InputBytes::open(f.path()).unwrap();
        assert!(input.bytes().is_empty());
    }
}
