use thiserror::Error;

use crate::pose::LandmarkIndex;

/// スケールキャリブレーション失敗
/// いずれも回復可能: スケール未設定のまま次の対象フレームで再試行する
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CalibrationError {
    #[error("calibration frame is missing landmark {0:?}")]
    MissingLandmark(LandmarkIndex),
    /// 足の開きが鼻-足首距離を上回る退化姿勢（平方根の中身が負になる）
    #[error(
        "degenerate calibration pose: heel half-span {heel_half_span} >= nose-ankle distance {hypotenuse}"
    )]
    DegenerateGeometry { hypotenuse: f32, heel_half_span: f32 },
}

/// フレーム解析時のエラー
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AnalysisError {
    /// 現在の処理に必要なランドマークが欠落。そのフレームだけスキップされる
    #[error("frame is missing landmark {0:?}")]
    MissingLandmark(LandmarkIndex),
    /// 基準ポーズ取得前の参照。呼び出し側の契約違反としてそのまま返す
    #[error("reference baseline has not been captured yet")]
    NotCaptured,
}
