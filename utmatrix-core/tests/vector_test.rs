use utmatrix_core::{OffsetVector, UtMatrixError, MAX_VECTOR_SIZE};

const SIZE: usize = 100;

fn ramp(size: usize) -> Result<OffsetVector<i32>, UtMatrixError> {
    let mut v = OffsetVector::new(size)?;
    for i in 0..size {
        v[i] = i as i32;
    }
    Ok(v)
}

#[test]
fn test_create_vector_sizes() -> Result<(), UtMatrixError> {
    let v: OffsetVector<i32> = OffsetVector::new(5)?;
    assert_eq!(v.size(), 5);

    let too_large = OffsetVector::<i32>::new(MAX_VECTOR_SIZE + 1);
    assert!(matches!(
        too_large,
        Err(UtMatrixError::InvalidSize { .. })
    ));
    Ok(())
}

#[test]
fn test_start_index_is_reported() -> Result<(), UtMatrixError> {
    let v: OffsetVector<i32> = OffsetVector::with_start_index(SIZE, 1)?;
    assert_eq!(v.start_index(), 1);
    assert_eq!(v.size(), SIZE);
    Ok(())
}

#[test]
fn test_copied_vector_is_equal_and_independent() -> Result<(), UtMatrixError> {
    let mut v1 = ramp(SIZE)?;
    let mut v2 = v1.clone();
    assert_eq!(v2.size(), SIZE);
    assert_eq!(v1, v2);

    for i in 0..SIZE {
        v2[i] = i as i32 + 1;
    }
    for i in 0..SIZE {
        assert_eq!(v1[i], i as i32);
        assert_eq!(v2[i], i as i32 + 1);
    }

    v1.set(0, -7)?;
    assert_eq!(*v2.get(0)?, 1);
    Ok(())
}

#[test]
fn test_set_and_get_element() -> Result<(), UtMatrixError> {
    let mut v: OffsetVector<i32> = OffsetVector::new(SIZE)?;
    v[0] = 42;
    assert_eq!(v[0], 42);
    assert_eq!(v.get(0), Ok(&42));
    Ok(())
}

#[test]
fn test_out_of_range_access_fails() -> Result<(), UtMatrixError> {
    let mut v: OffsetVector<i32> = OffsetVector::with_start_index(SIZE, 10)?;
    for index in [0, 9, SIZE + 10, SIZE + 52] {
        match v.set(index, 100) {
            Err(UtMatrixError::IndexOutOfRange { index: got, start, end }) => {
                assert_eq!(got, index);
                assert_eq!(start, 10);
                assert_eq!(end, SIZE + 10);
            }
            other => panic!("Expected IndexOutOfRange error, got {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn test_assign_to_itself_keeps_contents() -> Result<(), UtMatrixError> {
    let mut v = ramp(SIZE)?;
    v = v.clone();
    assert_eq!(v.size(), SIZE);
    for i in 0..SIZE {
        assert_eq!(v[i], i as i32);
    }
    Ok(())
}

#[test]
fn test_assign_vectors_of_equal_size() -> Result<(), UtMatrixError> {
    let mut v1 = ramp(SIZE)?;
    let v2 = v1.mul_scalar(42);
    v1.clone_from(&v2);
    assert_eq!(v1.size(), SIZE);
    for i in 0..SIZE {
        assert_eq!(v1[i], 42 * i as i32);
    }
    Ok(())
}

#[test]
fn test_assign_changes_size() -> Result<(), UtMatrixError> {
    let mut v1 = ramp(SIZE)?;
    let v2 = ramp(SIZE + 1)? * 42;
    v1.clone_from(&v2);
    assert_eq!(v1.size(), SIZE + 1);
    for i in 0..SIZE + 1 {
        assert_eq!(v1[i], 42 * i as i32);
    }
    Ok(())
}

#[test]
fn test_equality() -> Result<(), UtMatrixError> {
    let a = ramp(SIZE)?;
    let b = ramp(SIZE)?;
    let longer = ramp(SIZE + 1)?;
    assert_eq!(a, b);
    assert_eq!(a, a);
    assert_ne!(longer, a);
    Ok(())
}

#[test]
fn test_scalar_arithmetic() -> Result<(), UtMatrixError> {
    let v = ramp(SIZE)?;

    let plus = &v + 42;
    let minus = &v - 42;
    let times = &v * 42;
    for result in [&plus, &minus, &times] {
        assert_eq!(result.size(), SIZE);
    }
    for i in 0..SIZE {
        let x = i as i32;
        assert_eq!(plus[i], x + 42);
        assert_eq!(minus[i], x - 42);
        assert_eq!(times[i], x * 42);
    }
    Ok(())
}

#[test]
fn test_add_and_subtract_vectors() -> Result<(), UtMatrixError> {
    let a = ramp(SIZE)?;
    let b = &a * 42;

    let sum = (&a + &b)?;
    let diff = (&a - &b)?;
    assert_eq!(sum.size(), SIZE);
    for i in 0..SIZE {
        let x = i as i32;
        assert_eq!(sum[i], 42 * x + x);
        assert_eq!(diff[i], x - 42 * x);
    }

    assert_eq!((&sum - &b)?, a);
    assert_eq!((&b - &a)?, diff * -1);
    Ok(())
}

#[test]
fn test_dot_product() -> Result<(), UtMatrixError> {
    let a = ramp(SIZE)?;
    let b = ramp(SIZE)?;
    let expected: i32 = (0..SIZE as i32).map(|i| i * i).sum();
    assert_eq!((&a * &b)?, expected);
    Ok(())
}

#[test]
fn test_mismatched_sizes_are_rejected() -> Result<(), UtMatrixError> {
    let a = ramp(SIZE)?;
    let b = ramp(SIZE + 1)?;
    let mismatch = UtMatrixError::SizeMismatch {
        left: SIZE,
        right: SIZE + 1,
    };
    assert_eq!((&a + &b).err(), Some(mismatch.clone()));
    assert_eq!((&a - &b).err(), Some(mismatch.clone()));
    assert_eq!((&a * &b).err(), Some(mismatch));
    Ok(())
}

#[test]
fn test_float_vectors() -> Result<(), UtMatrixError> {
    let v = OffsetVector::from_vec(vec![0.5_f64, 1.5, 2.5], 3)?;
    let scaled = &v * 2.0;
    assert_eq!(scaled.as_slice(), &[1.0, 3.0, 5.0]);
    assert_eq!(scaled.start_index(), 3);
    assert_eq!(v.dot(&scaled)?, 0.5 + 4.5 + 12.5);
    Ok(())
}

#[test]
fn test_serde_validates_on_load() {
    let v = OffsetVector::from_vec(vec![1, 2, 3], 2).unwrap();
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, r#"{"start_index":2,"data":[1,2,3]}"#);
    let back: OffsetVector<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, v);
    assert_eq!(back.start_index(), 2);

    let overflow = format!(r#"{{"start_index":{},"data":[1,2]}}"#, usize::MAX);
    let err = serde_json::from_str::<OffsetVector<i32>>(&overflow).unwrap_err();
    assert!(err.to_string().contains("Invalid start index"));
}
