use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// 被写体の設定
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectConfig {
    /// 身長(cm)。スケールキャリブレーションの入力
    #[serde(default = "default_height_cm")]
    pub height_cm: f32,
}

fn default_height_cm() -> f32 {
    170.0
}

impl Default for SubjectConfig {
    fn default() -> Self {
        Self {
            height_cm: default_height_cm(),
        }
    }
}

/// 解析の設定
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// ランドマークを有効とみなす可視性の下限
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f32,
}

fn default_visibility_threshold() -> f32 {
    0.5
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: default_visibility_threshold(),
        }
    }
}

/// フレーム投入キューの設定
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// 処理待ちフレームの上限。あふれたら送信側がブロックする
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_queue_capacity() -> usize {
    8
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub subject: SubjectConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl Config {
    /// TOMLファイルから設定を読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("設定ファイルを開けません: {:?}", path.as_ref()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("設定ファイルを解釈できません: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// 読み込みに失敗した場合はデフォルト設定を返す
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Config {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{:#}. デフォルト設定を使用します", e);
                Config::default()
            }
        }
    }
}
