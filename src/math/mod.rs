//! 逻辑回归共用数值原语
//!
//! 四种优化器共享的底层计算：
//! - [`sigmoid_scalar`] / [`sigmoid`]: 带饱和裁剪的 logistic 函数
//! - [`compute_cost`]: 平均二元交叉熵（带概率裁剪，保证有限）
//! - [`evaluate_accuracy`]: 0.5 阈值下的分类准确率
//!
//! 所有函数使用 f64：sigmoid 的 ±500 输入裁剪和 1e-15 概率裁剪
//! 只有在双精度下才有意义（f32 下 exp(-500) 直接下溢为 0）。

use ndarray::{Array1, Array2};

use crate::errors::GradError;

/// sigmoid 输入裁剪阈值，防止 exp 溢出
const SIGMOID_CLIP: f64 = 500.0;

/// 概率裁剪下界，防止 log(0)
const PROB_CLIP: f64 = 1e-15;

/// 标量 sigmoid，输入先裁剪到 [-500, 500]
///
/// 裁剪保证极端输入下不溢出、不产生 NaN：负端 exp(500) 仍是
/// 有限值，返回值严格大于 0；正端 1/(1+exp(-500)) 在 f64 下
/// 会舍入到恰好 1.0，由代价函数的概率裁剪兜底 log(1-h)。
pub fn sigmoid_scalar(z: f64) -> f64 {
    let z = z.clamp(-SIGMOID_CLIP, SIGMOID_CLIP);
    1.0 / (1.0 + (-z).exp())
}

/// 逐元素 sigmoid
pub fn sigmoid(z: &Array1<f64>) -> Array1<f64> {
    z.mapv(sigmoid_scalar)
}

/// 计算平均二元交叉熵代价
///
/// 公式：`-(1/m) * (y·ln(h) + (1-y)·ln(1-h))`，其中 `h = sigmoid(X·w)`。
/// 取对数前将 h 裁剪到 `[1e-15, 1 - 1e-15]`，
/// 因此即使模型"自信地预测错误"，代价也始终有限。
///
/// # 参数
/// - `w`: 权重向量，长度须等于特征列数
/// - `x`: 特征矩阵（m × n，含偏置列）
/// - `y`: 标签向量（取值 0 或 1），长度须等于样本数
pub fn compute_cost(
    w: &Array1<f64>,
    x: &Array2<f64>,
    y: &Array1<f64>,
) -> Result<f64, GradError> {
    check_dataset(x, y)?;
    check_weights(x, w)?;

    let m = y.len() as f64;
    let h = sigmoid(&x.dot(w)).mapv(|p| p.clamp(PROB_CLIP, 1.0 - PROB_CLIP));

    let log_h = h.mapv(f64::ln);
    let log_one_minus_h = h.mapv(|p| (1.0 - p).ln());
    let one_minus_y = y.mapv(|v| 1.0 - v);

    Ok(-(y.dot(&log_h) + one_minus_y.dot(&log_one_minus_h)) / m)
}

/// 计算分类准确率
///
/// 预测规则：`sigmoid(x·w) >= 0.5` 判为 1，否则判为 0；
/// 返回预测标签与真实标签一致的比例，落在 [0, 1]。
pub fn evaluate_accuracy(
    w: &Array1<f64>,
    x: &Array2<f64>,
    y: &Array1<f64>,
) -> Result<f64, GradError> {
    check_dataset(x, y)?;
    check_weights(x, w)?;

    let correct = sigmoid(&x.dot(w))
        .iter()
        .zip(y.iter())
        .filter(|&(&p, &label)| {
            let pred = if p >= 0.5 { 1.0 } else { 0.0 };
            (pred - label).abs() < 0.5
        })
        .count();

    Ok(correct as f64 / y.len() as f64)
}

/// 校验数据集非空且特征与标签样本数一致
pub(crate) fn check_dataset(x: &Array2<f64>, y: &Array1<f64>) -> Result<(), GradError> {
    if x.nrows() == 0 || y.is_empty() {
        return Err(GradError::EmptyDataset);
    }
    if x.nrows() != y.len() {
        return Err(GradError::DimensionMismatch {
            expected: x.nrows(),
            got: y.len(),
        });
    }
    Ok(())
}

/// 校验权重长度与特征列数一致
pub(crate) fn check_weights(x: &Array2<f64>, w: &Array1<f64>) -> Result<(), GradError> {
    if x.ncols() != w.len() {
        return Err(GradError::DimensionMismatch {
            expected: x.ncols(),
            got: w.len(),
        });
    }
    Ok(())
}
