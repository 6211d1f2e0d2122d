// 该文件是 Lumina （植光） 项目的一部分。
// src/output.rs - 输出定义
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use thiserror::Error;
use url::Url;

use crate::FromUrl;
#[cfg(any(feature = "save_image_file", feature = "json_report"))]
use crate::FromUrlWithScheme;
use crate::pipeline::Report;

pub trait Render: Sized {
  type Error;
  fn render_report(&self, report: &Report) -> Result<(), Self::Error>;
}

mod panel;
pub use self::panel::{PanelOutput, format_panel};

#[cfg(feature = "save_image_file")]
mod save_image_file;
#[cfg(feature = "save_image_file")]
pub use self::save_image_file::{SaveImageFileError, SaveImageFileOutput};

#[cfg(feature = "json_report")]
mod json_report;
#[cfg(feature = "json_report")]
pub use self::json_report::{JsonReportError, JsonReportOutput};

#[derive(Error, Debug)]
pub enum OutputError {
  #[cfg(feature = "save_image_file")]
  #[error("保存图像文件错误: {0}")]
  SaveImageFileError(#[from] SaveImageFileError),
  #[cfg(feature = "json_report")]
  #[error("JSON 报告输出错误: {0}")]
  JsonReportError(#[from] JsonReportError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

pub enum OutputWrapper {
  #[cfg(feature = "save_image_file")]
  SaveImageFileOutput(SaveImageFileOutput),
  #[cfg(feature = "json_report")]
  JsonReportOutput(JsonReportOutput),
}

impl FromUrl for OutputWrapper {
  type Error = OutputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    match url.scheme() {
      #[cfg(feature = "save_image_file")]
      SaveImageFileOutput::SCHEME => {
        let output = SaveImageFileOutput::from_url(url)?;
        Ok(OutputWrapper::SaveImageFileOutput(output))
      }
      #[cfg(feature = "json_report")]
      JsonReportOutput::SCHEME => {
        let output = JsonReportOutput::from_url(url)?;
        Ok(OutputWrapper::JsonReportOutput(output))
      }
      scheme => Err(OutputError::SchemeMismatch(scheme.to_string())),
    }
  }
}

impl Render for OutputWrapper {
  type Error = OutputError;

  fn render_report(&self, report: &Report) -> Result<(), Self::Error> {
    match self {
      #[cfg(feature = "save_image_file")]
      OutputWrapper::SaveImageFileOutput(output) => output
        .render_report(report)
        .map_err(OutputError::from),
      #[cfg(feature = "json_report")]
      OutputWrapper::JsonReportOutput(output) => output
        .render_report(report)
        .map_err(OutputError::from),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_scheme_is_rejected() {
    let url = Url::parse("rtsp://localhost/stream").unwrap();
    assert!(matches!(
      OutputWrapper::from_url(&url),
      Err(OutputError::SchemeMismatch(scheme)) if scheme == "rtsp"
    ));
  }
}
