//! # Grad Lab
//!
//! `grad_lab` 在同一个二分类逻辑回归任务上对比四种一阶优化算法：
//! 普通 SGD、带动量的 SGD、RMSProp 与 Adam。
//! 四者逐样本（"真"随机梯度，无 mini-batch）更新权重，
//! 并在共享种子协议下运行，保证结果差异只来自更新规则本身。
//!
//! # 使用示例
//!
//! ```ignore
//! use grad_lab::data::{prepare_iris, stratified_split};
//! use grad_lab::experiment::{ExperimentConfig, results_table, run_experiment};
//!
//! let (x, y) = prepare_iris()?;
//! let split = stratified_split(&x, &y, 0.2, 42)?;
//! let results = run_experiment(
//!     &ExperimentConfig::default(),
//!     &split.train_x, &split.train_y,
//!     &split.test_x, &split.test_y,
//! )?;
//! println!("{}", results_table(&results));
//! ```

pub mod data;
pub mod errors;
pub mod experiment;
pub mod math;
pub mod optimizer;
