//! 数据准备模块
//!
//! 实验所需的数据侧工具：
//! - [`prepare_iris`]: 内嵌 Iris 二分类子集 → 标准化 → 插入偏置列
//! - [`standardize`]: 逐列零均值、单位方差
//! - [`add_bias_column`]: 在第 0 列插入常数 1 偏置项
//! - [`stratified_split`]: 按类别分层的随机训练/测试划分
//!
//! # 使用示例
//!
//! ```ignore
//! let (x, y) = prepare_iris()?;
//! let split = stratified_split(&x, &y, 0.2, 42)?;
//! ```

mod iris;

use ndarray::{Array1, Array2, Axis, s};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::errors::GradError;
use crate::math::check_dataset;

/// 分层划分的结果
#[derive(Debug, Clone)]
pub struct DataSplit {
    pub train_x: Array2<f64>,
    pub train_y: Array1<f64>,
    pub test_x: Array2<f64>,
    pub test_y: Array1<f64>,
}

/// 准备 Iris 二分类数据
///
/// Versicolor（标签 0）与 Virginica（标签 1）各 50 个样本，
/// 4 个特征逐列标准化后在最前面插入偏置列，
/// 返回 100 × 5 的特征矩阵和长度 100 的标签向量。
pub fn prepare_iris() -> Result<(Array2<f64>, Array1<f64>), GradError> {
    let mut raw = Array2::<f64>::zeros((100, 4));
    for (i, row) in iris::VERSICOLOR.iter().chain(iris::VIRGINICA.iter()).enumerate() {
        for (j, &v) in row.iter().enumerate() {
            raw[[i, j]] = v;
        }
    }
    let labels = Array1::from_shape_fn(100, |i| if i < 50 { 0.0 } else { 1.0 });

    let standardized = standardize(&raw)?;
    Ok((add_bias_column(&standardized), labels))
}

/// 逐列标准化（零均值、单位方差，总体标准差）
///
/// 任一列方差为零时报 [`GradError::ZeroVarianceColumn`]。
pub fn standardize(x: &Array2<f64>) -> Result<Array2<f64>, GradError> {
    if x.nrows() == 0 {
        return Err(GradError::EmptyDataset);
    }
    let m = x.nrows() as f64;
    let mut out = x.clone();
    for j in 0..x.ncols() {
        let col = x.column(j);
        let mean = col.sum() / m;
        let std = (col.mapv(|v| (v - mean) * (v - mean)).sum() / m).sqrt();
        if std == 0.0 {
            return Err(GradError::ZeroVarianceColumn(j));
        }
        out.column_mut(j).mapv_inplace(|v| (v - mean) / std);
    }
    Ok(out)
}

/// 在第 0 列插入常数 1.0 的偏置列
pub fn add_bias_column(x: &Array2<f64>) -> Array2<f64> {
    let (m, n) = x.dim();
    let mut out = Array2::<f64>::ones((m, n + 1));
    out.slice_mut(s![.., 1..]).assign(x);
    out
}

/// 按类别分层的随机训练/测试划分
///
/// 每个类别内部先用种子化的 rng 打乱，再按 `test_ratio`
/// 切出测试集，保证两侧的类别比例与整体一致
/// （对应 sklearn `train_test_split(..., stratify=y)` 的行为）。
///
/// # 参数
/// - `test_ratio`: 测试集占比，须在 (0, 1) 内
/// - `seed`: 划分用随机种子（与训练用种子相互独立）
pub fn stratified_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    test_ratio: f64,
    seed: u64,
) -> Result<DataSplit, GradError> {
    check_dataset(x, y)?;
    assert!(
        test_ratio > 0.0 && test_ratio < 1.0,
        "测试集占比必须在 (0, 1) 内"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_idx = Vec::new();
    let mut test_idx = Vec::new();

    // 逐类别打乱并切分
    for class in [0.0, 1.0] {
        let mut class_idx: Vec<usize> = y
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == class)
            .map(|(i, _)| i)
            .collect();
        class_idx.shuffle(&mut rng);

        let n_test = ((class_idx.len() as f64) * test_ratio).round() as usize;
        test_idx.extend_from_slice(&class_idx[..n_test]);
        train_idx.extend_from_slice(&class_idx[n_test..]);
    }

    Ok(DataSplit {
        train_x: x.select(Axis(0), &train_idx),
        train_y: y.select(Axis(0), &train_idx),
        test_x: x.select(Axis(0), &test_idx),
        test_y: y.select(Axis(0), &test_idx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr2;

    #[test]
    fn test_standardize_zero_mean_unit_variance() {
        let x = arr2(&[[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]]);
        let z = standardize(&x).unwrap();
        for j in 0..2 {
            let col = z.column(j);
            let mean = col.sum() / 4.0;
            let var = col.mapv(|v| (v - mean) * (v - mean)).sum() / 4.0;
            assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(var, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_standardize_rejects_constant_column() {
        let x = arr2(&[[1.0, 5.0], [2.0, 5.0], [3.0, 5.0]]);
        assert_eq!(standardize(&x), Err(GradError::ZeroVarianceColumn(1)));
    }

    #[test]
    fn test_add_bias_column() {
        let x = arr2(&[[2.0, 3.0], [4.0, 5.0]]);
        let b = add_bias_column(&x);
        assert_eq!(b.dim(), (2, 3));
        assert_eq!(b.column(0).to_vec(), vec![1.0, 1.0]);
        assert_eq!(b[[0, 1]], 2.0);
        assert_eq!(b[[1, 2]], 5.0);
    }

    #[test]
    fn test_prepare_iris_shape_and_labels() {
        let (x, y) = prepare_iris().unwrap();
        assert_eq!(x.dim(), (100, 5));
        assert_eq!(y.len(), 100);
        // 偏置列恒为 1
        assert!(x.column(0).iter().all(|&v| v == 1.0));
        // 两类各 50
        assert_eq!(y.iter().filter(|&&v| v == 0.0).count(), 50);
        assert_eq!(y.iter().filter(|&&v| v == 1.0).count(), 50);
    }

    #[test]
    fn test_stratified_split_preserves_class_balance() {
        let (x, y) = prepare_iris().unwrap();
        let split = stratified_split(&x, &y, 0.2, 42).unwrap();

        assert_eq!(split.train_x.nrows(), 80);
        assert_eq!(split.test_x.nrows(), 20);
        // 两侧类别比例与整体一致
        assert_eq!(split.test_y.iter().filter(|&&v| v == 1.0).count(), 10);
        assert_eq!(split.train_y.iter().filter(|&&v| v == 1.0).count(), 40);
    }

    #[test]
    fn test_stratified_split_deterministic() {
        let (x, y) = prepare_iris().unwrap();
        let a = stratified_split(&x, &y, 0.2, 42).unwrap();
        let b = stratified_split(&x, &y, 0.2, 42).unwrap();
        assert_eq!(a.train_x, b.train_x);
        assert_eq!(a.test_y, b.test_y);
    }
}
