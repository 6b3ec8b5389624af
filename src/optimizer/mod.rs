/*
 * @Author       : 老董
 * @Date         : 2026-08-02 10:32:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-08-25 19:04:11
 * @Description  : 优化器模块：四种一阶优化算法的"真"随机梯度版本
 *
 * 每种优化器实现同一套训练协议（逐样本更新，无 mini-batch）：
 * 1. 权重用 N(0, 0.01) 小幅随机初始化（从外部传入的 rng 采样）
 * 2. 优化器自身的累积状态清零
 * 3. 每个 epoch 重新抽取一次样本顺序的随机排列，
 *    按排列逐样本计算梯度并原地更新权重
 * 4. 每个 epoch 结束后在全训练集上记录一次代价
 *
 * rng 由调用方显式传入：实验驱动器在每个优化器运行前用同一种子
 * 重建 rng，保证四种算法看到完全相同的初始权重和打乱序列，
 * 从而把结果差异完全归因于更新规则本身。
 */

mod adam;
mod momentum;
mod rmsprop;
mod sgd;

pub use adam::Adam;
pub use momentum::Momentum;
pub use rmsprop::RmsProp;
pub use sgd::Sgd;

use enum_dispatch::enum_dispatch;
use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::errors::GradError;
use crate::math::{check_dataset, compute_cost, sigmoid_scalar};

/// 权重初始化的标准差
pub(crate) const WEIGHT_INIT_STD: f64 = 0.01;

/// 一次训练运行的产出：最终权重 + 逐 epoch 代价序列
///
/// `costs.len()` 恒等于请求的 epoch 数。
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    /// 最终权重向量
    pub weights: Array1<f64>,
    /// 逐 epoch 的全训练集代价
    pub costs: Vec<f64>,
}

/// 优化器核心 trait
///
/// # 使用示例
/// ```ignore
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut opt = Sgd::new(0.05);
/// let outcome = opt.optimize(&x, &y, 30, &mut rng)?;
/// println!("最终代价: {}", outcome.costs.last().unwrap());
/// ```
#[enum_dispatch]
pub trait Optimizer {
    /// 优化器名称（用于结果表格与报告）
    fn name(&self) -> &'static str;

    /// 在训练集上运行固定 epoch 数的逐样本随机梯度训练
    ///
    /// 每次调用都重新初始化权重和累积状态，
    /// 因此同一个优化器实例可以复用于多次独立运行。
    ///
    /// # 参数
    /// - `x`: 特征矩阵（m × n，含偏置列），训练期间不可变
    /// - `y`: 标签向量（取值 0 或 1）
    /// - `epochs`: 训练轮数，必须大于 0
    /// - `rng`: 随机源，依次消耗：权重初始化 → 每 epoch 的打乱
    fn optimize(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        epochs: usize,
        rng: &mut StdRng,
    ) -> Result<TrainOutcome, GradError>;
}

/// 四种优化器的标签联合，便于驱动器按统一类型遍历
#[enum_dispatch(Optimizer)]
#[derive(Debug, Clone)]
pub enum OptimizerKind {
    Sgd,
    Momentum,
    RmsProp,
    Adam,
}

/// 校验训练输入（epoch 数为正、数据集非空且对齐）
pub(crate) fn check_training_input(
    x: &Array2<f64>,
    y: &Array1<f64>,
    epochs: usize,
) -> Result<(), GradError> {
    if epochs == 0 {
        return Err(GradError::InvalidEpochCount);
    }
    check_dataset(x, y)
}

/// 用 Box-Muller 变换从 rng 采样 N(0, std_dev) 初始化权重
///
/// 每对均匀随机数产出两个正态样本；u1 = 0 时 ln 发散，
/// 产生的非有限值直接丢弃重采。
pub(crate) fn init_weights(n: usize, std_dev: f64, rng: &mut StdRng) -> Array1<f64> {
    let mut data = Vec::with_capacity(n);
    while data.len() < n {
        let u1: f64 = rng.r#gen();
        let u2: f64 = rng.r#gen();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * u2;
        let z0 = std_dev * r * theta.cos();
        let z1 = std_dev * r * theta.sin();

        if z0.is_finite() {
            data.push(z0);
        }
        if data.len() < n && z1.is_finite() {
            data.push(z1);
        }
    }
    Array1::from_vec(data)
}

/// 抽取一个全新的样本顺序随机排列（每 epoch 调用一次）
pub(crate) fn shuffled_indices(m: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..m).collect();
    indices.shuffle(rng);
    indices
}

/// 单样本梯度：`(sigmoid(x_i·w) - y_i) * x_i`
pub(crate) fn example_gradient(
    xi: &ArrayView1<f64>,
    w: &Array1<f64>,
    yi: f64,
) -> Array1<f64> {
    let h = sigmoid_scalar(xi.dot(w));
    xi.mapv(|v| (h - yi) * v)
}

/// epoch 末尾记录全训练集代价
pub(crate) fn record_epoch_cost(
    costs: &mut Vec<f64>,
    w: &Array1<f64>,
    x: &Array2<f64>,
    y: &Array1<f64>,
) -> Result<(), GradError> {
    costs.push(compute_cost(w, x, y)?);
    Ok(())
}
