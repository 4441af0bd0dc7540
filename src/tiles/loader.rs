use crate::core::geo::TileCoord;
use crate::tiles::source::TileSource;
use crate::Result;
use crossbeam_channel::Sender;
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::thread;
use std::time::Duration;

/// Shared blocking HTTP client with a custom User-Agent so that public tile
/// servers (e.g. OpenStreetMap) don't reject the request. Building the
/// client once avoids the cost of TLS and connection pool setup per tile.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(crate::USER_AGENT)
        .build()
        .expect("failed to build reqwest blocking client")
});

/// A downloaded and decoded tile ready to upload as a texture.
pub struct TileImage {
    pub coord: TileCoord,
    pub image: egui::ColorImage,
}

/// Fetches tiles on detached background threads and reports the decoded
/// images back over a channel.
pub struct TileLoader {
    tx: Sender<TileImage>,
}

impl TileLoader {
    /// Creates a new tile loader given a sender to report completed
    /// downloads.
    pub fn new(tx: Sender<TileImage>) -> Self {
        Self { tx }
    }

    /// Starts downloading the specified tile. The download occurs on a
    /// detached thread so that it never blocks the UI; when the request
    /// finishes the sender receives the decoded image. A failed tile is
    /// retried once and then given up on, degrading visuals only.
    pub fn start_download(&self, source: &TileSource, coord: TileCoord) {
        let url = source.url(coord);
        let tx = self.tx.clone();

        thread::spawn(move || {
            const MAX_ATTEMPTS: usize = 2;
            for attempt in 1..=MAX_ATTEMPTS {
                match fetch_and_decode(&url) {
                    Ok(image) => {
                        log::debug!("downloaded tile {:?} from {}", coord, url);
                        let _ = tx.send(TileImage { coord, image });
                        return;
                    }
                    Err(e) => {
                        log::warn!("tile {:?} failed on attempt {}: {}", coord, attempt, e);
                        if attempt == MAX_ATTEMPTS {
                            log::error!("giving up on tile {:?}", coord);
                        } else {
                            thread::sleep(Duration::from_millis(100));
                        }
                    }
                }
            }
        });
    }
}

fn fetch_and_decode(url: &str) -> Result<egui::ColorImage> {
    let bytes = HTTP_CLIENT
        .get(url)
        .send()?
        .error_for_status()?
        .bytes()?;

    let rgba = image::load_from_memory(&bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
