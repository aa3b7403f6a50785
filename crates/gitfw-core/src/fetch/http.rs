//! Single-stream HTTP GET of the installer into the staging `.part` file.

use crate::net::NetworkOptions;
use crate::retry::FetchError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Downloads `url` with one GET, following redirects, writing the body to `dest`
/// (truncated first). Returns the number of bytes written.
pub fn download_to(url: &str, dest: &Path, net: &NetworkOptions) -> Result<u64, FetchError> {
    let file = File::create(dest).map_err(FetchError::Storage)?;
    let mut out = BufWriter::new(file);
    let mut written = 0u64;
    let mut write_err: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(std::time::Duration::from_secs(60))?;
    net.apply(&mut easy)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match out.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                tracing::warn!("installer write failed: {}", e);
                write_err = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(FetchError::Storage(e));
    }
    performed?;

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    out.flush().map_err(FetchError::Storage)?;
    out.get_ref().sync_all().map_err(FetchError::Storage)?;
    Ok(written)
}
