// 该文件是 Lumina （植光） 项目的一部分。
// src/label.rs - 生长阶段标签归一化
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

use std::collections::BTreeMap;

use serde::Deserialize;

pub const GERMINATION: &str = "Germination";
pub const GROWING: &str = "Growing";
pub const HARVESTING: &str = "Harvesting";

/// 模型原始类别名到生长阶段标签的映射，未收录的标签原样保留
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LabelMap {
  entries: BTreeMap<String, String>,
}

impl Default for LabelMap {
  fn default() -> Self {
    [
      ("Flowering", GROWING),
      ("Vegetative", GROWING),
      (GERMINATION, GERMINATION),
      (HARVESTING, HARVESTING),
    ]
    .into_iter()
    .collect()
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelMap {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self {
      entries: iter
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    }
  }
}

impl LabelMap {
  pub fn normalize(&self, raw: &str) -> String {
    self
      .entries
      .get(raw)
      .cloned()
      .unwrap_or_else(|| raw.to_string())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn growth_labels_collapse_to_growing() {
    let map = LabelMap::default();
    assert_eq!(map.normalize("Flowering"), "Growing");
    assert_eq!(map.normalize("Vegetative"), "Growing");
  }

  #[test]
  fn terminal_stages_map_to_themselves() {
    let map = LabelMap::default();
    assert_eq!(map.normalize("Germination"), "Germination");
    assert_eq!(map.normalize("Harvesting"), "Harvesting");
  }

  #[test]
  fn unknown_labels_pass_through() {
    let map = LabelMap::default();
    for raw in ["Seedling", "", "flowering", "Growing", "class_7"] {
      assert_eq!(map.normalize(raw), raw);
    }
  }

  #[test]
  fn custom_map_replaces_defaults() {
    let map: LabelMap = [("Bolting", "Harvesting")].into_iter().collect();
    assert_eq!(map.len(), 1);
    assert_eq!(map.normalize("Bolting"), "Harvesting");
    assert_eq!(map.normalize("Flowering"), "Flowering");
  }
}
