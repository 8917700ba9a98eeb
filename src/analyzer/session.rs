use serde::Serialize;

use super::calibration::{calibrate_scale, CalibrationScale};
use super::jump::{JumpEvent, JumpPhase, JumpPhaseDetector};
use super::metrics::{self, MetricsFrame, SessionMetrics};
use super::reference::ReferenceBaseline;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::pose::{LandmarkFrame, LandmarkIndex};
use crate::render::LineSegment;

/// 表示スレッド向けの値スナップショット
/// コア内部ではロックしないため、別スレッドはこの値コピーを読む
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub phase: JumpPhase,
    pub calibrated: bool,
    pub jump_height_cm: Option<f32>,
    pub max_jump_height_cm: f32,
    pub max_jump_duration_ms: u64,
    pub frames_processed: u64,
}

/// セッション終了時の結果
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub subject_height_cm: f32,
    pub max_jump_height_cm: f32,
    pub max_jump_duration_ms: u64,
    pub jumps: Vec<JumpEvent>,
    pub series: crate::series::JumpSeries,
}

/// 1セッションぶんの解析コンテキスト
///
/// スケール・基準ポーズ・フェーズ状態・累計値をすべて所有する。
/// 変更はフレーム処理経路のみ。セッション終了で破棄される
#[derive(Debug)]
pub struct JumpSession {
    height_cm: f32,
    visibility_threshold: f32,
    start_ms: Option<u64>,
    scale: Option<CalibrationScale>,
    baseline: Option<ReferenceBaseline>,
    detector: JumpPhaseDetector,
    metrics: SessionMetrics,
    jumps: Vec<JumpEvent>,
    series: crate::series::JumpSeries,
    last_height_cm: Option<f32>,
    frames_processed: u64,
}

impl JumpSession {
    /// 被写体の身長(cm)から新しいセッションを開始する
    pub fn new(height_cm: f32) -> Self {
        Self::from_config(&AnalysisConfig::default(), height_cm)
    }

    pub fn from_config(config: &AnalysisConfig, height_cm: f32) -> Self {
        Self {
            height_cm,
            visibility_threshold: config.visibility_threshold,
            start_ms: None,
            scale: None,
            baseline: None,
            detector: JumpPhaseDetector::new(),
            metrics: SessionMetrics::default(),
            jumps: Vec::new(),
            series: crate::series::JumpSeries::new(),
            last_height_cm: None,
            frames_processed: 0,
        }
    }

    /// 1フレームを処理して出力レコードを返す
    ///
    /// 必要ランドマークが欠落したフレームはNone（そのフレームのみ劣化、
    /// 状態は保持）。スケール未確定の間は高さ出力がNoneになる
    pub fn process(&mut self, frame: &LandmarkFrame) -> Option<MetricsFrame> {
        let ts = frame.timestamp_ms;
        let start_ms = *self.start_ms.get_or_insert(ts);
        self.frames_processed += 1;

        // スケールは最初の対象フレームで一度だけ確定する
        if self.scale.is_none() {
            match calibrate_scale(frame, self.height_cm, self.visibility_threshold) {
                Ok(scale) => {
                    log::info!("scale calibrated: {:.4} cm/unit", scale.cm_per_unit());
                    self.scale = Some(scale);
                }
                Err(e) => log::debug!("calibration deferred at {}ms: {}", ts, e),
            }
        }

        // 基準ポーズも最初の対象フレームで一度だけ
        if self.baseline.is_none() {
            match ReferenceBaseline::capture(frame, self.visibility_threshold) {
                Ok(baseline) => {
                    log::info!("reference baseline captured at {}ms", ts);
                    self.baseline = Some(baseline);
                }
                Err(e) => {
                    log::debug!("baseline not captured at {}ms: {}", ts, e);
                    return None;
                }
            }
        }
        let baseline = self.baseline?;

        let (current_line, left_foot_y, right_foot_y) = match self.frame_inputs(frame) {
            Ok(inputs) => inputs,
            Err(e) => {
                log::debug!("frame at {}ms skipped: {}", ts, e);
                return None;
            }
        };

        let jump = self
            .detector
            .advance(ts, left_foot_y, right_foot_y, &baseline);
        if let Some(event) = jump {
            log::info!("jump completed: {} ms airborne", event.duration_ms());
            self.metrics.record_jump(&event);
            self.jumps.push(event);
        }

        let jump_height_cm = self
            .scale
            .map(|scale| metrics::jump_height_cm(&current_line, &baseline, scale));
        if let Some(height) = jump_height_cm {
            self.metrics.record_height(height);
            self.series
                .record(ts.saturating_sub(start_ms) as f32 / 1000.0, height);
            self.last_height_cm = Some(height);
        }

        Some(MetricsFrame {
            timestamp_ms: ts,
            jump_height_cm,
            phase: self.detector.phase(),
            max_jump_height_cm: self.metrics.max_jump_height_cm,
            max_jump_duration_ms: self.metrics.max_jump_duration_ms,
            reference_line: baseline.shoulder_line,
            current_line,
            jump,
        })
    }

    /// 肩ラインと両足のY座標。どれか欠けていればそのフレームは計測不能
    fn frame_inputs(
        &self,
        frame: &LandmarkFrame,
    ) -> Result<(LineSegment, f32, f32), AnalysisError> {
        let threshold = self.visibility_threshold;
        let left_shoulder = frame.require(LandmarkIndex::LeftShoulder, threshold)?;
        let right_shoulder = frame.require(LandmarkIndex::RightShoulder, threshold)?;
        let left_foot = frame.require(LandmarkIndex::LeftFootIndex, threshold)?;
        let right_foot = frame.require(LandmarkIndex::RightFootIndex, threshold)?;
        Ok((
            LineSegment::between(left_shoulder, right_shoulder),
            left_foot.y,
            right_foot.y,
        ))
    }

    pub fn is_calibrated(&self) -> bool {
        self.scale.is_some()
    }

    pub fn scale(&self) -> Option<CalibrationScale> {
        self.scale
    }

    pub fn phase(&self) -> JumpPhase {
        self.detector.phase()
    }

    /// 基準肩ライン。基準ポーズ取得前の呼び出しは契約違反
    pub fn reference_shoulder_line(&self) -> Result<LineSegment, AnalysisError> {
        self.baseline
            .map(|b| b.shoulder_line)
            .ok_or(AnalysisError::NotCaptured)
    }

    /// 左右の足の基準Y座標
    pub fn reference_foot_baseline(&self) -> Result<(f32, f32), AnalysisError> {
        self.baseline
            .map(|b| (b.left_foot_y, b.right_foot_y))
            .ok_or(AnalysisError::NotCaptured)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            phase: self.detector.phase(),
            calibrated: self.scale.is_some(),
            jump_height_cm: self.last_height_cm,
            max_jump_height_cm: self.metrics.max_jump_height_cm,
            max_jump_duration_ms: self.metrics.max_jump_duration_ms,
            frames_processed: self.frames_processed,
        }
    }

    /// セッションを終了して結果を返す
    /// 空中のまま終了した場合、そのジャンプのイベントは発行されない
    pub fn finish(self) -> SessionReport {
        if self.detector.phase() == JumpPhase::Airborne {
            log::debug!("session ended while airborne; in-progress jump discarded");
        }
        SessionReport {
            subject_height_cm: self.height_cm,
            max_jump_height_cm: self.metrics.max_jump_height_cm,
            max_jump_duration_ms: self.metrics.max_jump_duration_ms,
            jumps: self.jumps,
            series: self.series,
        }
    }
}
