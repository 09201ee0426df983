use image::RgbaImage;
use reqwest::blocking::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Downloading the icon failed")]
    Http,
    #[error("Decoding the icon failed")]
    Decode,
    #[error("Icon has no visible pixels")]
    Empty,
}

/// Average color of the icon at `url` as `#RRGGBB`.
pub fn dominant_color(client: &Client, url: &str) -> Result<String, ThemeError> {
    let response = client.get(url).send().map_err(|err| {
        log::debug!("GET '{}' failed - '{}'", url, err);
        ThemeError::Http
    })?;

    if !response.status().is_success() {
        log::debug!("GET '{}': response {}", url, response.status());
        return Err(ThemeError::Http);
    }

    let bytes = response.bytes().map_err(|_| ThemeError::Http)?;
    color_of(&bytes)
}

pub fn color_of(bytes: &[u8]) -> Result<String, ThemeError> {
    let image = image::load_from_memory(bytes).map_err(|err| {
        log::debug!("Decoding icon failed - '{}'", err);
        ThemeError::Decode
    })?;
    average_color(&image.to_rgba8())
}

/// Fully transparent pixels don't count.
fn average_color(image: &RgbaImage) -> Result<String, ThemeError> {
    let mut sum = [0u64; 3];
    let mut count = 0u64;

    for pixel in image.pixels().filter(|pixel| pixel[3] > 0) {
        for (channel, total) in sum.iter_mut().enumerate() {
            *total += u64::from(pixel[channel]);
        }
        count += 1;
    }

    if count == 0 {
        return Err(ThemeError::Empty);
    }

    Ok(format!(
        "#{:02X}{:02X}{:02X}",
        sum[0] / count,
        sum[1] / count,
        sum[2] / count
    ))
}

#[cfg(test)]
mod tests {
    use super::{color_of, ThemeError};
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(image: RgbaImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn averages_visible_pixels() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        image.put_pixel(1, 1, Rgba([0, 255, 0, 0]));

        assert_eq!(color_of(&png(image)).unwrap(), "#AA0055");
    }

    #[test]
    fn transparent_icon() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 0]));
        assert!(matches!(color_of(&png(image)), Err(ThemeError::Empty)));
    }

    #[test]
    fn garbage() {
        assert!(matches!(
            color_of(b"definitely not an icon"),
            Err(ThemeError::Decode)
        ));
    }
}
