use imageproc::rect::Rect;

/// Bounding box of a recognized word, as origin plus size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the bottom-right corner.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom-right corner.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Center point, for callers that act on the region (e.g. click it).
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Smallest rectangle enclosing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        BoundingBox::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Map the box back to pre-upscaling coordinates.
    ///
    /// Both corners are divided (truncating) by `factor` and the size is
    /// recomputed from the divided corners. `factor` must be non-zero.
    pub fn scaled_down(&self, factor: u32) -> BoundingBox {
        let x1 = self.x / factor;
        let y1 = self.y / factor;
        let x2 = self.right() / factor;
        let y2 = self.bottom() / factor;
        BoundingBox::new(x1, y1, x2 - x1, y2 - y1)
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        let x = rect.left().max(0) as u32;
        let y = rect.top().max(0) as u32;
        Self {
            x,
            y,
            width: rect.width(),
            height: rect.height(),
        }
    }
}

/// One OCR-recognized word: text content plus its box in the pixel space
/// of the image the engine saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedWord {
    pub bbox: BoundingBox,
    pub text: String,
}

impl RecognizedWord {
    pub fn new(bbox: BoundingBox, text: String) -> Self {
        Self { bbox, text }
    }

    /// Build a word from raw engine bytes, dropping byte runs that do not
    /// decode as UTF-8 (no replacement characters are inserted).
    pub fn from_raw_bytes(bbox: BoundingBox, raw: &[u8]) -> Self {
        Self::new(bbox, clean_utf8(raw))
    }
}

/// Decode `raw` as UTF-8, skipping undecodable bytes entirely.
pub fn clean_utf8(raw: &[u8]) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut rest = raw;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(err) => {
                let valid_up_to = err.valid_up_to();
                if let Ok(valid) = std::str::from_utf8(&rest[..valid_up_to]) {
                    text.push_str(valid);
                }
                let skip = err.error_len().unwrap_or(rest.len() - valid_up_to);
                rest = &rest[valid_up_to + skip..];
            }
        }
    }
    text
}
