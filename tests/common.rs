use image::{DynamicImage, ImageFormat, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use uri_squeeze::datauri::{encode_data_uri, BinaryPayload};

pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

pub fn png_data_uri(width: u32, height: u32) -> String {
    let img = gradient_image(width, height);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    encode_data_uri(&BinaryPayload::new(buf.into_inner(), "image/png", "test.png"))
}

pub fn jpeg_data_uri(width: u32, height: u32) -> String {
    let img = gradient_image(width, height);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Jpeg).unwrap();
    encode_data_uri(&BinaryPayload::new(buf.into_inner(), "image/jpeg", "test.jpg"))
}

pub fn write_uri_file(dir: &Path, name: &str, uri: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, uri).unwrap();
    path
}
