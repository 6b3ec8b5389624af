//! Adam（Adaptive Moment Estimation）
//!
//! 同时维护梯度的一阶矩和二阶矩估计：
//! - m ← β1·m + (1-β1)·g
//! - v ← β2·v + (1-β2)·g²
//! - 偏差修正：m̂ = m/(1-β1^t)，v̂ = v/(1-β2^t)
//! - w ← w - lr·m̂ / (√v̂ + ε)
//!
//! 时间步 t 按"单个样本更新"递增，跨 epoch 持续累加、
//! 绝不在 epoch 之间清零；ε 加在 √v̂ 之后的分母上。

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;

use super::{
    Optimizer, TrainOutcome, WEIGHT_INIT_STD, check_training_input, example_gradient,
    init_weights, record_epoch_cost, shuffled_indices,
};
use crate::errors::GradError;

/// Adam 优化器
#[derive(Debug, Clone)]
pub struct Adam {
    /// 学习率
    lr: f64,
    /// β1（一阶矩衰减）
    beta1: f64,
    /// β2（二阶矩衰减）
    beta2: f64,
    /// 数值稳定项
    epsilon: f64,
    /// 最近一次运行结束时的时间步（等于 epoch 数 × 样本数）
    t: usize,
}

impl Adam {
    /// 创建新的 Adam 优化器（β1 = 0.9，β2 = 0.999，ε = 1e-8）
    pub fn new(lr: f64) -> Self {
        Self::new_with_config(lr, 0.9, 0.999, 1e-8)
    }

    /// 创建带完整配置的 Adam 优化器
    ///
    /// # Panics
    /// 学习率非正、β1/β2 不在 [0, 1) 内或 ε 非正时 panic
    pub fn new_with_config(lr: f64, beta1: f64, beta2: f64, epsilon: f64) -> Self {
        assert!(lr > 0.0 && lr.is_finite(), "学习率必须为正的有限值");
        assert!((0.0..1.0).contains(&beta1), "β1 必须在 [0, 1) 内");
        assert!((0.0..1.0).contains(&beta2), "β2 必须在 [0, 1) 内");
        assert!(epsilon > 0.0, "数值稳定项必须大于 0");
        Self {
            lr,
            beta1,
            beta2,
            epsilon,
            t: 0,
        }
    }

    /// 获取学习率
    pub const fn learning_rate(&self) -> f64 {
        self.lr
    }

    /// 获取最近一次运行结束时的时间步
    ///
    /// 用于调试与验证：t 在整个运行中单调递增，
    /// 运行结束时恒等于 epoch 数 × 样本数。
    pub const fn timestep(&self) -> usize {
        self.t
    }
}

impl Default for Adam {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl Optimizer for Adam {
    fn name(&self) -> &'static str {
        "Adam"
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
        // 一阶/二阶矩估计与时间步，运行开始时清零
        let mut m_moment = Array1::<f64>::zeros(n);
        let mut v_moment = Array1::<f64>::zeros(n);
        self.t = 0;
        let mut costs = Vec::with_capacity(epochs);

        for _ in 0..epochs {
            for i in shuffled_indices(m, rng) {
                self.t += 1;
                let grad = example_gradient(&x.row(i), &w, y[i]);

                // 更新有偏矩估计
                m_moment
                    .zip_mut_with(&grad, |mj, &g| *mj = self.beta1 * *mj + (1.0 - self.beta1) * g);
                v_moment.zip_mut_with(&grad, |vj, &g| {
                    *vj = self.beta2 * *vj + (1.0 - self.beta2) * g * g
                });

                // 偏差修正后更新参数
                let bc1 = 1.0 - self.beta1.powi(self.t as i32);
                let bc2 = 1.0 - self.beta2.powi(self.t as i32);
                for j in 0..n {
                    let m_hat = m_moment[j] / bc1;
                    let v_hat = v_moment[j] / bc2;
                    w[j] -= self.lr * m_hat / (v_hat.sqrt() + self.epsilon);
                }
            }
            record_epoch_cost(&mut costs, &w, x, y)?;
        }

        Ok(TrainOutcome { weights: w, costs })
    }
}
