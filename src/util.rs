use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

const BUF_CAPACITY: usize = 256 * 1024;

pub fn looks_like_gzip<R: Read + Seek>(mut r: R) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    let pos = r.seek(SeekFrom::Current(0))?;
    let n = r.read(&mut magic)?;
    r.seek(SeekFrom::Start(pos))?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}

/// Open a FASTA file as a buffered line source, transparently decompressing
/// gzip input. Gzip is detected by the `.gz` extension or the magic bytes.
pub fn open_source(path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
    let f = File::open(path)?;

    let is_gz = path.extension().and_then(|s| s.to_str()) == Some("gz")
        || looks_like_gzip(&f).unwrap_or(false);

    if is_gz {
        log::info!("detected gzipped fasta file: {}", path.display());
        let dec = MultiGzDecoder::new(f);
        Ok(Box::new(BufReader::with_capacity(BUF_CAPACITY, dec)))
    } else {
        Ok(Box::new(BufReader::with_capacity(BUF_CAPACITY, f)))
    }
}
