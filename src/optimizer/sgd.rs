//! 标准随机梯度下降（SGD）
//!
//! 无任何累积状态的基线算法，更新规则：`w ← w - lr * grad`。

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;

use super::{
    Optimizer, TrainOutcome, WEIGHT_INIT_STD, check_training_input, example_gradient,
    init_weights, record_epoch_cost, shuffled_indices,
};
use crate::errors::GradError;

/// SGD 优化器
#[derive(Debug, Clone)]
pub struct Sgd {
    /// 学习率
    lr: f64,
}

impl Sgd {
    /// 创建新的 SGD 优化器
    ///
    /// # Panics
    /// 学习率非正或非有限时 panic
    pub fn new(lr: f64) -> Self {
        assert!(lr > 0.0 && lr.is_finite(), "学习率必须为正的有限值");
        Self { lr }
    }

    /// 获取学习率
    pub const fn learning_rate(&self) -> f64 {
        self.lr
    }
}

impl Default for Sgd {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl Optimizer for Sgd {
    fn name(&self) -> &'static str {
        "SGD"
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
        let mut costs = Vec::with_capacity(epochs);

        for _ in 0..epochs {
            for i in shuffled_indices(m, rng) {
                let grad = example_gradient(&x.row(i), &w, y[i]);
                w.scaled_add(-self.lr, &grad);
            }
            record_epoch_cost(&mut costs, &w, x, y)?;
        }

        Ok(TrainOutcome { weights: w, costs })
    }
}
