//! 带动量的 SGD
//!
//! 在目标值持续下降的方向上累积速度向量：
//! `v ← γ·v + lr·grad`，`w ← w - v`。
//! γ = 0 时逐位退化为同学习率的普通 SGD。

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;

use super::{
    Optimizer, TrainOutcome, WEIGHT_INIT_STD, check_training_input, example_gradient,
    init_weights, record_epoch_cost, shuffled_indices,
};
use crate::errors::GradError;

/// SGD + Momentum 优化器
#[derive(Debug, Clone)]
pub struct Momentum {
    /// 学习率
    lr: f64,
    /// 动量系数 γ
    gamma: f64,
}

impl Momentum {
    /// 创建新的动量优化器
    ///
    /// # 参数
    /// - `lr`: 学习率
    /// - `gamma`: 动量系数，通常取 0.9；取 0 时等价于普通 SGD
    ///
    /// # Panics
    /// 学习率非正、或 gamma 不在 [0, 1) 内时 panic
    pub fn new(lr: f64, gamma: f64) -> Self {
        assert!(lr > 0.0 && lr.is_finite(), "学习率必须为正的有限值");
        assert!((0.0..1.0).contains(&gamma), "动量系数必须在 [0, 1) 内");
        Self { lr, gamma }
    }

    /// 获取学习率
    pub const fn learning_rate(&self) -> f64 {
        self.lr
    }

    /// 获取动量系数
    pub const fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(0.03, 0.9)
    }
}

impl Optimizer for Momentum {
    fn name(&self) -> &'static str {
        "SGD + Momentum"
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
        // 速度向量，运行开始时清零
        let mut v = Array1::<f64>::zeros(n);
        let mut costs = Vec::with_capacity(epochs);

        for _ in 0..epochs {
            for i in shuffled_indices(m, rng) {
                let grad = example_gradient(&x.row(i), &w, y[i]);
                v.zip_mut_with(&grad, |vj, &g| *vj = self.gamma * *vj + self.lr * g);
                w -= &v;
            }
            record_epoch_cost(&mut costs, &w, x, y)?;
        }

        Ok(TrainOutcome { weights: w, costs })
    }
}
