//! Rendered images and the formats they can be written in.
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// An 8-bit RGB image stored row-major, topmost row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl Image {
    /// Create a black image.
    pub fn new(width: usize, height: usize) -> Self {
        Image {
            width,
            height,
            pixels: vec![[0; 3]; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixel in column `x` of row `y`, counting rows from the top.
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        self.pixels[y * self.width + x] = rgb;
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Write the image as a plain text PPM (`P3`).
    pub fn write_ppm<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "P3")?;
        writeln!(w, "{} {}", self.width, self.height)?;
        writeln!(w, "255")?;
        for [r, g, b] in &self.pixels {
            writeln!(w, "{} {} {}", r, g, b)?;
        }
        w.flush()
    }

    /// Write the image as an 8-bit RGB PNG.
    pub fn write_png<W: Write>(&self, w: W) -> OutputResult<()> {
        let mut encoder = png::Encoder::new(w, self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        let data = self.pixels.iter().flatten().copied().collect::<Vec<u8>>();
        writer.write_image_data(&data)?;
        writer.finish()?;
        Ok(())
    }

    /// Save the image to `path`.
    ///
    /// The format is chosen by extension: `.png` writes a PNG, anything else a PPM.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> OutputResult<()> {
        let path = path.as_ref();
        let file = BufWriter::new(File::create(path)?);
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => self.write_png(file),
            _ => Ok(self.write_ppm(file)?),
        }
    }
}
