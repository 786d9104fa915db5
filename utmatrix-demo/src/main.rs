use std::error::Error;

use utmatrix_core::{Matrix, OffsetVector, UpperTriangularMatrix, UtMatrixError};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let size = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<usize>())
        .transpose()?
        .unwrap_or(5);

    // Vector: v[i] = i, shifted by a scalar and dotted with itself.
    let mut v: OffsetVector<i64> = OffsetVector::new(size)?;
    for i in v.indices() {
        v[i] = i as i64;
    }
    let shifted = &v + 42;
    log::info!("v + 42 = {:?}", shifted.as_slice());
    log::info!("v . v = {}", (&v * &v)?);

    // Matrix: m[i][j] = i * 10 + j over the upper triangle.
    let mut m: UpperTriangularMatrix<i64> = UpperTriangularMatrix::new(size)?;
    for i in 0..size {
        for j in i..size {
            m[(i, j)] = (i * 10 + j) as i64;
        }
    }
    log::info!(
        "Matrix {:?} stores {} cells",
        m.dims(),
        m.element_count()
    );
    for row in m.to_dense() {
        println!("{:?}", row);
    }

    let doubled = (&m + &m)?;
    let y = doubled.mul_vector(&v)?;
    log::info!("(m + m) * v = {:?}", y.as_slice());

    // Operands of different sizes are rejected rather than truncated.
    let other_size = if size == 0 { 1 } else { size - 1 };
    let other: UpperTriangularMatrix<i64> = UpperTriangularMatrix::new(other_size)?;
    match &m + &other {
        Err(err @ UtMatrixError::SizeMismatch { .. }) => log::info!("Rejected: {}", err),
        Err(err) => return Err(err.into()),
        Ok(_) => log::warn!("Matrices of different size were added"),
    }

    Ok(())
}
