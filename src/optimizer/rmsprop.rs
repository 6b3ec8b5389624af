//! RMSProp（Root Mean Square Propagation）
//!
//! 用近期梯度幅值的滑动平均为每个参数自适应缩放学习率：
//! `E ← ρ·E + (1-ρ)·grad²`（逐元素），
//! `w ← w - lr·grad / (√E + ε)`（逐元素）。
//!
//! 注意 ε 加在开方之后的分母上，而不是根号内部——
//! 这一位置是数值语义的一部分，不能改动。

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;

use super::{
    Optimizer, TrainOutcome, WEIGHT_INIT_STD, check_training_input, example_gradient,
    init_weights, record_epoch_cost, shuffled_indices,
};
use crate::errors::GradError;

/// RMSProp 优化器
#[derive(Debug, Clone)]
pub struct RmsProp {
    /// 学习率
    lr: f64,
    /// 滑动平均衰减率 ρ
    rho: f64,
    /// 数值稳定项
    epsilon: f64,
}

impl RmsProp {
    /// 创建新的 RMSProp 优化器（ρ = 0.9，ε = 1e-8）
    pub fn new(lr: f64) -> Self {
        Self::new_with_config(lr, 0.9, 1e-8)
    }

    /// 创建带完整配置的 RMSProp 优化器
    ///
    /// # Panics
    /// 学习率非正、ρ 不在 [0, 1) 内或 ε 非正时 panic
    pub fn new_with_config(lr: f64, rho: f64, epsilon: f64) -> Self {
        assert!(lr > 0.0 && lr.is_finite(), "学习率必须为正的有限值");
        assert!((0.0..1.0).contains(&rho), "衰减率必须在 [0, 1) 内");
        assert!(epsilon > 0.0, "数值稳定项必须大于 0");
        Self { lr, rho, epsilon }
    }

    /// 获取学习率
    pub const fn learning_rate(&self) -> f64 {
        self.lr
    }
}

impl Default for RmsProp {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl Optimizer for RmsProp {
    fn name(&self) -> &'static str {
        "RMSProp"
    }

    fn optimize(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        epochs: usize,
        rng: &mut StdRng,
    ) -> Result<TrainOutcome, GradError> {
        check_training_input(x, y, epochs)?;
        let (m, n) = x.dim();

        let mut w = init_weights(n, WEIGHT_INIT_STD, rng);
        // 平方梯度滑动平均 E[g²]，运行开始时清零
        let mut e_grad2 = Array1::<f64>::zeros(n);
        let mut costs = Vec::with_capacity(epochs);

        for _ in 0..epochs {
            for i in shuffled_indices(m, rng) {
                let grad = example_gradient(&x.row(i), &w, y[i]);
                e_grad2
                    .zip_mut_with(&grad, |e, &g| *e = self.rho * *e + (1.0 - self.rho) * g * g);
                for j in 0..n {
                    w[j] -= self.lr * grad[j] / (e_grad2[j].sqrt() + self.epsilon);
                }
            }
            record_epoch_cost(&mut costs, &w, x, y)?;
        }

        Ok(TrainOutcome { weights: w, costs })
    }
}
