use serde::Serialize;

/// セッション経過秒 → ジャンプ高さ(cm) の時系列
/// 結果チャート用にキャリブレーション済みフレームごとに1サンプル記録される
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JumpSeries {
    samples: Vec<(f32, f32)>,
}

impl JumpSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed_secs: f32, height_cm: f32) {
        self.samples.push((elapsed_secs, height_cm));
    }

    pub fn samples(&self) -> &[(f32, f32)] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 高さ系列の局所最大値インデックス
    pub fn peaks(&self) -> Vec<usize> {
        let heights: Vec<f32> = self.samples.iter().map(|&(_, h)| h).collect();
        find_peaks(&heights)
    }
}

/// 両隣より厳密に大きい値のインデックスを返す。端点はピークにならない
pub fn find_peaks(data: &[f32]) -> Vec<usize> {
    let mut peaks = Vec::new();
    for i in 1..data.len().saturating_sub(1) {
        if data[i] > data[i - 1] && data[i] > data[i + 1] {
            peaks.push(i);
        }
    }
    peaks
}
