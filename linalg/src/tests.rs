use crate::{partitions, LinalgError, Matrix, Partition, Vector};

#[test]
fn test_vector_bounds() {
    let mut v = Vector::new(3);
    assert!(v.set(2, 4.0).is_ok());
    assert_eq!(v.get(2), Ok(4.0));
    assert_eq!(
        v.get(3),
        Err(LinalgError::IndexOutOfBounds { index: 3, len: 3 })
    );
    assert_eq!(
        v.set(7, 1.0),
        Err(LinalgError::IndexOutOfBounds { index: 7, len: 3 })
    );
}

#[test]
fn test_vector_size_mismatch() {
    let a = Vector::new(3);
    let b = Vector::new(4);
    let expected = Err(LinalgError::SizeMismatch { left: 3, right: 4 });
    assert_eq!(a.subtract(&b), expected);
    assert_eq!(a.add(&b), expected);
    assert_eq!(a.dot(&b).map(|_| ()), Err(LinalgError::SizeMismatch { left: 3, right: 4 }));
}

#[test]
fn test_vector_fill() {
    let mut b = Vector::new(8);
    b.fill();
    assert_eq!(b, Vector::filled(8, 9.0));
}

#[test]
fn test_vector_concatenate() {
    let mut a = Vector::from(vec![1.0, 2.0]);
    a.concatenate(&Vector::from(vec![3.0]));
    assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0]);
    assert_eq!(a.len(), 3);
}

#[test]
fn test_vector_norm_and_scale() {
    let v = Vector::from(vec![3.0, 4.0]);
    assert_eq!(v.norm(), 5.0);
    assert_eq!(v.scale(-2.0).as_slice(), &[-6.0, -8.0]);
    assert_eq!(Vector::new(5).norm(), 0.0);
}

#[test]
fn test_matrix_fill_pattern() {
    let a = Matrix::benchmark(4);
    for i in 0..4 {
        for j in 0..4 {
            let expected = if i == j { 2.0 } else { 1.0 };
            assert_eq!(a.get(i, j), Ok(expected));
        }
    }
    assert!(a.get(4, 0).is_err());
    assert!(a.get(0, 4).is_err());
}

#[test]
fn test_matrix_multiply() {
    let a = Matrix::from_row_major(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let x = Vector::from(vec![1.0, 0.0, -1.0]);
    assert_eq!(a.multiply(&x).unwrap().as_slice(), &[-2.0, -2.0]);
    assert_eq!(
        a.multiply(&Vector::new(2)),
        Err(LinalgError::SizeMismatch { left: 3, right: 2 })
    );
}

#[test]
fn test_benchmark_system_solution() {
    // (I + J) * 1 = (n + 1) * 1
    let n = 8;
    let a = Matrix::benchmark(n);
    let mut b = Vector::new(n);
    b.fill();
    let ones = Vector::filled(n, 1.0);
    assert_eq!(a.multiply(&ones).unwrap(), b);
}

#[test]
fn test_partition_bounds() {
    let p = Partition::new(8, 1, 4).unwrap();
    assert_eq!(p.rows(), 2..4);
    assert_eq!(p.len(), 2);

    assert_eq!(
        Partition::new(8, 0, 3),
        Err(LinalgError::UnevenPartition { size: 8, count: 3 })
    );
    assert_eq!(
        Partition::new(8, 0, 0),
        Err(LinalgError::UnevenPartition { size: 8, count: 0 })
    );
    assert_eq!(
        Partition::new(8, 4, 4),
        Err(LinalgError::WorkerOutOfRange { worker: 4, count: 4 })
    );

    let all = partitions(12, 3).unwrap();
    assert_eq!(
        all.iter().map(|p| p.rows()).collect::<Vec<_>>(),
        vec![0..4, 4..8, 8..12]
    );
}

#[test]
fn test_slice_rejects_uneven_split() {
    let v = Vector::new(10);
    assert_eq!(
        v.slice_for(0, 4),
        Err(LinalgError::UnevenPartition { size: 10, count: 4 })
    );
    let a = Matrix::benchmark(10);
    assert!(a.slice_for(0, 3).is_err());
    assert!(a.slice_rows(4, 11).is_err());
}
