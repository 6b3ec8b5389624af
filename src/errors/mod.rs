//! 错误类型定义
//!
//! 整个 crate 共用一个错误枚举 [`GradError`]。
//! 数值层面的风险（sigmoid 溢出、log(0)）通过裁剪在内部化解，
//! 不会以错误形式暴露；只有调用方传入的非法输入才会报错。

use thiserror::Error;

/// 训练与评估相关错误
#[derive(Debug, Error, PartialEq)]
pub enum GradError {
    /// 维度不匹配（特征列数与权重长度、或样本数与标签数不一致）
    #[error("维度不匹配: 期望 {expected}, 实际 {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// 数据集为空
    #[error("数据集为空")]
    EmptyDataset,

    /// epoch 数必须为正整数
    #[error("epoch 数必须大于 0")]
    InvalidEpochCount,

    /// 标准化时遇到零方差列
    #[error("第 {0} 列方差为零，无法标准化")]
    ZeroVarianceColumn(usize),

    /// 结果序列化失败
    #[error("序列化错误: {0}")]
    SerializationError(String),
}
