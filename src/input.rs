// 该文件是 Lumina （植光） 项目的一部分。
// src/input.rs - 上传图像读取
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::io::Cursor;

use image::{ImageFormat, ImageReader, RgbImage};
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, url_to_path};

/// 允许上传的图像格式
pub const ACCEPTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Jpeg, ImageFormat::Png];

#[derive(Error, Debug)]
pub enum ImageFileInputError {
  #[error("URI schema mismatch: {0}")]
  SchemaMismatch(String),
  #[error("I/O error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("Image loading error: {0}")]
  ImageLoadError(#[from] image::ImageError),
  #[error("Unsupported image format: {0}")]
  UnsupportedFormat(String),
}

/// 解码上传的 JPEG/PNG 数据为 RGB 图像，格式由内容判断而非扩展名
pub fn decode_upload(data: &[u8]) -> Result<RgbImage, ImageFileInputError> {
  let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;

  match reader.format() {
    Some(format) if ACCEPTED_FORMATS.contains(&format) => {
      debug!("上传图像格式: {:?}", format);
    }
    Some(format) => {
      error!("不支持的图像格式: {:?}", format);
      return Err(ImageFileInputError::UnsupportedFormat(format!("{:?}", format)));
    }
    None => {
      error!("无法识别的图像格式");
      return Err(ImageFileInputError::UnsupportedFormat("unknown".to_string()));
    }
  }

  Ok(reader.decode()?.to_rgb8())
}

pub struct ImageFileInput {
  image: RgbImage,
}

impl FromUrlWithScheme for ImageFileInput {
  const SCHEME: &'static str = "image";
}

impl FromUrl for ImageFileInput {
  type Error = ImageFileInputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI scheme mismatch: expected '{}', found '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(ImageFileInputError::SchemaMismatch(url.scheme().to_string()));
    }

    let path = url_to_path(url);
    info!("读取上传图像: {}", path.display());
    let data = std::fs::read(&path)?;
    Self::from_bytes(&data)
  }
}

impl ImageFileInput {
  pub fn from_bytes(data: &[u8]) -> Result<Self, ImageFileInputError> {
    let image = decode_upload(data)?;
    info!("图像尺寸: {}x{}", image.width(), image.height());
    Ok(Self { image })
  }

  pub fn image(&self) -> &RgbImage {
    &self.image
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{DynamicImage, Rgb};

  fn encoded(format: ImageFormat) -> Vec<u8> {
    let image = RgbImage::from_fn(8, 6, |x, y| Rgb([(x * 30) as u8, (y * 40) as u8, 128]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
      .write_to(&mut buffer, format)
      .unwrap();
    buffer.into_inner()
  }

  #[test]
  fn png_round_trips_losslessly() {
    let image = decode_upload(&encoded(ImageFormat::Png)).unwrap();
    assert_eq!(image.dimensions(), (8, 6));
    assert_eq!(*image.get_pixel(2, 3), Rgb([60, 120, 128]));
  }

  #[test]
  fn jpeg_is_accepted() {
    let image = decode_upload(&encoded(ImageFormat::Jpeg)).unwrap();
    assert_eq!(image.dimensions(), (8, 6));
  }

  #[test]
  fn other_formats_are_rejected() {
    assert!(matches!(
      decode_upload(&encoded(ImageFormat::Bmp)),
      Err(ImageFileInputError::UnsupportedFormat(_))
    ));
    assert!(matches!(
      decode_upload(b"definitely not an image"),
      Err(ImageFileInputError::UnsupportedFormat(_))
    ));
  }

  #[test]
  fn reads_from_image_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lettuce photo.png");
    std::fs::write(&path, encoded(ImageFormat::Png)).unwrap();

    let url = Url::from_file_path(&path).unwrap();
    let url = Url::parse(&url.as_str().replacen("file", "image", 1)).unwrap();
    let input = ImageFileInput::from_url(&url).unwrap();
    assert_eq!(input.image().dimensions(), (8, 6));
  }

  #[test]
  fn wrong_scheme_is_rejected() {
    let url = Url::parse("replay:///tmp/lettuce.png").unwrap();
    assert!(matches!(
      ImageFileInput::from_url(&url),
      Err(ImageFileInputError::SchemaMismatch(_))
    ));
  }
}
