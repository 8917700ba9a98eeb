use serde::Serialize;

use crate::error::CalibrationError;
use crate::pose::{Landmark, LandmarkFrame, LandmarkIndex};

/// 開発時の基準解像度から導出されたキャリブレーション定数
pub const CALIBRATION_FACTOR: f32 = 2.53;

/// 正規化座標1単位あたりのセンチメートル換算スケール
/// セッションごとに最初の対象フレームから一度だけ算出され、以後再計算されない
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationScale(f32);

impl CalibrationScale {
    pub fn cm_per_unit(&self) -> f32 {
        self.0
    }

    /// 正規化座標の距離をセンチメートルに換算
    pub fn to_cm(&self, units: f32) -> f32 {
        units * self.0
    }
}

fn required(
    frame: &LandmarkFrame,
    index: LandmarkIndex,
    threshold: f32,
) -> Result<&Landmark, CalibrationError> {
    frame
        .require(index, threshold)
        .map_err(|_| CalibrationError::MissingLandmark(index))
}

/// 既知の身長と1フレームの姿勢からスケールを算出する
///
/// 鼻から両足首の中点までの垂直距離を斜辺とし、足首の開き（半分）を
/// ピタゴラスの定理で補正して直立身長のピクセル相当値を得る:
/// `pixel_height = sqrt(hypotenuse^2 - (heel_span/2)^2)`
pub fn calibrate_scale(
    frame: &LandmarkFrame,
    height_cm: f32,
    visibility_threshold: f32,
) -> Result<CalibrationScale, CalibrationError> {
    let nose = required(frame, LandmarkIndex::Nose, visibility_threshold)?;
    let left_ankle = required(frame, LandmarkIndex::LeftAnkle, visibility_threshold)?;
    let right_ankle = required(frame, LandmarkIndex::RightAnkle, visibility_threshold)?;
    // 算術には使わないが、対象フレームの条件として両足の検出も要求する
    required(frame, LandmarkIndex::LeftFootIndex, visibility_threshold)?;
    required(frame, LandmarkIndex::RightFootIndex, visibility_threshold)?;

    let ankle_mid_y = (left_ankle.y + right_ankle.y) / 2.0;
    let hypotenuse = (ankle_mid_y - nose.y).abs();
    let heel_half_span = left_ankle.distance_to(right_ankle) / 2.0;

    let radicand = hypotenuse * hypotenuse - heel_half_span * heel_half_span;
    if radicand <= 0.0 {
        return Err(CalibrationError::DegenerateGeometry {
            hypotenuse,
            heel_half_span,
        });
    }

    let pixel_height = radicand.sqrt();
    Ok(CalibrationScale(height_cm / pixel_height / CALIBRATION_FACTOR))
}
