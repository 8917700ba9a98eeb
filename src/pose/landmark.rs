use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// ポーズ推定パイプラインが出力する 17 ランドマークのインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftShoulder = 1,
    RightShoulder = 2,
    LeftElbow = 3,
    RightElbow = 4,
    LeftWrist = 5,
    RightWrist = 6,
    LeftHip = 7,
    RightHip = 8,
    LeftKnee = 9,
    RightKnee = 10,
    LeftAnkle = 11,
    RightAnkle = 12,
    LeftHeel = 13,
    RightHeel = 14,
    LeftFootIndex = 15,
    RightFootIndex = 16,
}

impl LandmarkIndex {
    pub const COUNT: usize = 17;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Nose),
            1 => Some(Self::LeftShoulder),
            2 => Some(Self::RightShoulder),
            3 => Some(Self::LeftElbow),
            4 => Some(Self::RightElbow),
            5 => Some(Self::LeftWrist),
            6 => Some(Self::RightWrist),
            7 => Some(Self::LeftHip),
            8 => Some(Self::RightHip),
            9 => Some(Self::LeftKnee),
            10 => Some(Self::RightKnee),
            11 => Some(Self::LeftAnkle),
            12 => Some(Self::RightAnkle),
            13 => Some(Self::LeftHeel),
            14 => Some(Self::RightHeel),
            15 => Some(Self::LeftFootIndex),
            16 => Some(Self::RightFootIndex),
            _ => None,
        }
    }
}

fn default_visibility() -> f32 {
    1.0
}

/// 単一ランドマーク
/// 正規化画像座標: 原点は左上、yは下向きに増加
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// 正規化されたX座標 (0.0〜1.0)
    pub x: f32,
    /// 正規化されたY座標 (0.0〜1.0)
    pub y: f32,
    /// 可視性スコア (0.0〜1.0)。ログに無ければ 1.0 とみなす
    #[serde(default = "default_visibility")]
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }

    /// 可視性が閾値以上か
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }

    /// 2点間の直線距離（正規化座標）
    pub fn distance_to(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Landmark {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            visibility: 0.0,
        }
    }
}

/// 1検出時刻ぶんのランドマーク一式
/// タイムスタンプはパイプラインの単調クロック（ミリ秒）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkFrame {
    pub timestamp_ms: u64,
    pub landmarks: [Landmark; LandmarkIndex::COUNT],
}

impl LandmarkFrame {
    pub fn new(timestamp_ms: u64, landmarks: [Landmark; LandmarkIndex::COUNT]) -> Self {
        Self {
            timestamp_ms,
            landmarks,
        }
    }

    /// インデックスでランドマークを取得
    pub fn get(&self, index: LandmarkIndex) -> &Landmark {
        &self.landmarks[index as usize]
    }

    /// 可視性閾値を満たすランドマークを取得。満たさなければ欠落扱い
    pub fn require(
        &self,
        index: LandmarkIndex,
        threshold: f32,
    ) -> Result<&Landmark, AnalysisError> {
        let landmark = self.get(index);
        if landmark.is_visible(threshold) {
            Ok(landmark)
        } else {
            Err(AnalysisError::MissingLandmark(index))
        }
    }

    /// 全ランドマークの平均可視性
    pub fn average_visibility(&self) -> f32 {
        let sum: f32 = self.landmarks.iter().map(|l| l.visibility).sum();
        sum / LandmarkIndex::COUNT as f32
    }
}
