/*
 * @Author       : 老董
 * @Date         : 2026-08-03 09:15:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-08-25 19:04:11
 * @Description  : 实验驱动器：在匹配条件下依次运行四种优化器并汇总结果
 *
 * 公平对比协议：按固定声明顺序 {SGD, Momentum, RMSProp, Adam} 遍历，
 * 每个优化器运行前都用同一配置种子重建一个全新的 StdRng，
 * 因此四种算法看到完全相同的初始权重和逐 epoch 打乱序列——
 * 结果差异只能来自更新规则本身，而非初始化或样本顺序的噪声。
 */

use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::errors::GradError;
use crate::math::evaluate_accuracy;
use crate::optimizer::{Adam, Momentum, Optimizer, OptimizerKind, RmsProp, Sgd};

/// 实验配置
///
/// 默认值即原始实验设定：30 个 epoch、种子 42、
/// 各优化器超参数见字段默认值。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// 训练轮数
    pub epochs: usize,
    /// 随机种子（每个优化器运行前重置）
    pub seed: u64,

    pub sgd_lr: f64,

    pub momentum_lr: f64,
    pub momentum_gamma: f64,

    pub rmsprop_lr: f64,
    pub rmsprop_rho: f64,
    pub rmsprop_epsilon: f64,

    pub adam_lr: f64,
    pub adam_beta1: f64,
    pub adam_beta2: f64,
    pub adam_epsilon: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            epochs: 30,
            seed: 42,
            sgd_lr: 0.05,
            momentum_lr: 0.03,
            momentum_gamma: 0.9,
            rmsprop_lr: 0.05,
            rmsprop_rho: 0.9,
            rmsprop_epsilon: 1e-8,
            adam_lr: 0.05,
            adam_beta1: 0.9,
            adam_beta2: 0.999,
            adam_epsilon: 1e-8,
        }
    }
}

impl ExperimentConfig {
    /// 按固定声明顺序构造四个优化器实例
    pub fn build_optimizers(&self) -> Vec<OptimizerKind> {
        vec![
            Sgd::new(self.sgd_lr).into(),
            Momentum::new(self.momentum_lr, self.momentum_gamma).into(),
            RmsProp::new_with_config(self.rmsprop_lr, self.rmsprop_rho, self.rmsprop_epsilon)
                .into(),
            Adam::new_with_config(
                self.adam_lr,
                self.adam_beta1,
                self.adam_beta2,
                self.adam_epsilon,
            )
            .into(),
        ]
    }
}

/// 单个优化器的实验结果（运行结束后不再变更）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerResult {
    /// 优化器名称
    pub name: String,
    /// 最终权重向量
    pub weights: Array1<f64>,
    /// 最后一个 epoch 的代价
    pub final_cost: f64,
    /// 训练集准确率
    pub train_accuracy: f64,
    /// 测试集准确率
    pub test_accuracy: f64,
    /// 逐 epoch 代价序列（长度等于 epoch 数）
    pub cost_history: Vec<f64>,
}

/// 在匹配条件下依次运行四种优化器
///
/// # 参数
/// - `config`: 实验配置（epoch 数、种子、各优化器超参数）
/// - `train_x` / `train_y`: 标准化、含偏置列的训练集
/// - `test_x` / `test_y`: 同构的测试集
///
/// # 返回
/// 按声明顺序排列的四个 [`OptimizerResult`]
pub fn run_experiment(
    config: &ExperimentConfig,
    train_x: &Array2<f64>,
    train_y: &Array1<f64>,
    test_x: &Array2<f64>,
    test_y: &Array1<f64>,
) -> Result<Vec<OptimizerResult>, GradError> {
    let mut results = Vec::with_capacity(4);

    for mut opt in config.build_optimizers() {
        // 每次运行前重建同种子 rng，保证跨优化器公平对比
        let mut rng = StdRng::seed_from_u64(config.seed);
        let outcome = opt.optimize(train_x, train_y, config.epochs, &mut rng)?;

        let train_accuracy = evaluate_accuracy(&outcome.weights, train_x, train_y)?;
        let test_accuracy = evaluate_accuracy(&outcome.weights, test_x, test_y)?;
        let final_cost = *outcome.costs.last().ok_or(GradError::InvalidEpochCount)?;

        results.push(OptimizerResult {
            name: opt.name().to_string(),
            weights: outcome.weights,
            final_cost,
            train_accuracy,
            test_accuracy,
            cost_history: outcome.costs,
        });
    }

    Ok(results)
}

/// 渲染对齐的结果文本表格
pub fn results_table(results: &[OptimizerResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>12} {:>12} {:>12}",
        "优化器", "最终代价", "训练准确率", "测试准确率"
    );
    let _ = writeln!(out, "{}", "-".repeat(56));
    for r in results {
        let _ = writeln!(
            out,
            "{:<16} {:>12.6} {:>12.4} {:>12.4}",
            r.name, r.final_cost, r.train_accuracy, r.test_accuracy
        );
    }
    out
}

/// 将实验结果序列化为带缩进的 JSON 字符串（含完整代价历史）
pub fn results_json(results: &[OptimizerResult]) -> Result<String, GradError> {
    serde_json::to_string_pretty(results)
        .map_err(|e| GradError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn tiny_dataset() -> (Array2<f64>, Array1<f64>, Array2<f64>, Array1<f64>) {
        let train_x = arr2(&[
            [1.0, 1.2],
            [1.0, -1.1],
            [1.0, 0.9],
            [1.0, -1.4],
            [1.0, 1.5],
            [1.0, -0.8],
        ]);
        let train_y = arr1(&[1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        let test_x = arr2(&[[1.0, 1.3], [1.0, -1.2]]);
        let test_y = arr1(&[1.0, 0.0]);
        (train_x, train_y, test_x, test_y)
    }

    #[test]
    fn test_experiment_fixed_order_and_lengths() {
        let (train_x, train_y, test_x, test_y) = tiny_dataset();
        let config = ExperimentConfig {
            epochs: 5,
            ..Default::default()
        };
        let results = run_experiment(&config, &train_x, &train_y, &test_x, &test_y).unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["SGD", "SGD + Momentum", "RMSProp", "Adam"]);
        for r in &results {
            assert_eq!(r.cost_history.len(), 5);
            assert_eq!(r.final_cost, *r.cost_history.last().unwrap());
            assert!((0.0..=1.0).contains(&r.train_accuracy));
            assert!((0.0..=1.0).contains(&r.test_accuracy));
        }
    }

    #[test]
    fn test_experiment_reruns_identical() {
        let (train_x, train_y, test_x, test_y) = tiny_dataset();
        let config = ExperimentConfig {
            epochs: 6,
            ..Default::default()
        };
        let a = run_experiment(&config, &train_x, &train_y, &test_x, &test_y).unwrap();
        let b = run_experiment(&config, &train_x, &train_y, &test_x, &test_y).unwrap();
        for (ra, rb) in a.iter().zip(b.iter()) {
            assert_eq!(ra.weights, rb.weights);
            assert_eq!(ra.cost_history, rb.cost_history);
        }
    }

    #[test]
    fn test_shared_seed_gives_identical_shuffle_stream() {
        // γ = 0 的 Momentum 与同学习率 SGD 在共享种子协议下逐位一致，
        // 间接证明每次运行确实看到相同的初始化与打乱序列
        let (train_x, train_y, test_x, test_y) = tiny_dataset();
        let config = ExperimentConfig {
            epochs: 10,
            sgd_lr: 0.05,
            momentum_lr: 0.05,
            momentum_gamma: 0.0,
            ..Default::default()
        };
        let results = run_experiment(&config, &train_x, &train_y, &test_x, &test_y).unwrap();
        assert_eq!(results[0].weights, results[1].weights);
        assert_eq!(results[0].cost_history, results[1].cost_history);
    }

    #[test]
    fn test_results_render() {
        let (train_x, train_y, test_x, test_y) = tiny_dataset();
        let config = ExperimentConfig {
            epochs: 3,
            ..Default::default()
        };
        let results = run_experiment(&config, &train_x, &train_y, &test_x, &test_y).unwrap();

        let table = results_table(&results);
        assert!(table.contains("SGD"));
        assert!(table.contains("Adam"));

        let json = results_json(&results).unwrap();
        assert!(json.contains("\"cost_history\""));
        assert!(json.contains("\"RMSProp\""));
    }
}
