// src/validation/mod.rs

//! Algebraic and numerical checks on codes and simulated states.
//!
//! Code construction does not call these; they are offered for callers
//! that want to vet a tableau before use, and are exercised by the tests.

use crate::code::{GeneratorMatrix, StabilizerCode, gf2};
use crate::core::{LogicalError, StabilizerTableau};
use ndarray::{Array3, Axis};
use num_complex::Complex;

const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that every pair of generators commutes.
///
/// # Errors
/// `LogicalError::Construction` naming the first anticommuting pair.
pub fn check_stabilizers_commute(tableau: &StabilizerTableau) -> Result<(), LogicalError> {
    let g = GeneratorMatrix::from_tableau(tableau);
    let (x, z) = (g.x_part(), g.z_part());
    let m = g.num_rows();
    for a in 0..m {
        for b in a + 1..m {
            let product = gf2::symplectic_product(x.row(a), z.row(a), x.row(b), z.row(b));
            if product != 0 {
                return Err(LogicalError::Construction {
                    message: format!("Stabilizers {} and {} anticommute", a, b),
                });
            }
        }
    }
    Ok(())
}

/// Checks the derived logical operators of `code`:
/// each commutes with every stabilizer, logical X_i and Z_j anticommute
/// exactly when i == j, and logicals of the same kind commute.
pub fn check_logical_operators(code: &StabilizerCode) -> Result<(), LogicalError> {
    let g = GeneratorMatrix::from_tableau(code.tableau());
    let (sx, sz) = (g.x_part(), g.z_part());
    let lx = code.logicals().x();
    let lz = code.logicals().z();
    let k = code.logicals().num_logical();

    for (name, vectors) in [("X", lx), ("Z", lz)] {
        for i in 0..k {
            for s in 0..g.num_rows() {
                if product_with(vectors, i, sx.row(s), sz.row(s)) != 0 {
                    return Err(LogicalError::Construction {
                        message: format!(
                            "Logical {}{} anticommutes with stabilizer {}",
                            name, i, s
                        ),
                    });
                }
            }
        }
    }

    for i in 0..k {
        for j in 0..k {
            let xz = pairwise(lx, i, lz, j);
            if xz != u8::from(i == j) {
                return Err(LogicalError::Construction {
                    message: format!("Logical X{} and Z{} have symplectic product {}", i, j, xz),
                });
            }
            if pairwise(lx, i, lx, j) != 0 || pairwise(lz, i, lz, j) != 0 {
                return Err(LogicalError::Construction {
                    message: format!("Logicals {} and {} of the same kind anticommute", i, j),
                });
            }
        }
    }
    Ok(())
}

/// Checks that a state vector has unit norm.
pub fn check_normalization(
    state: &[Complex<f64>],
    tolerance: Option<f64>,
) -> Result<(), LogicalError> {
    let tol = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.iter().map(|a| a.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > tol {
        return Err(LogicalError::SimulationError {
            message: format!("State norm squared {} deviates from 1 by more than {}", norm_sq, tol),
        });
    }
    Ok(())
}

fn product_with(
    vectors: &Array3<u8>,
    i: usize,
    other_x: ndarray::ArrayView1<'_, u8>,
    other_z: ndarray::ArrayView1<'_, u8>,
) -> u8 {
    let row = vectors.index_axis(Axis(1), i);
    gf2::symplectic_product(row.row(0), row.row(1), other_x, other_z)
}

fn pairwise(a: &Array3<u8>, i: usize, b: &Array3<u8>, j: usize) -> u8 {
    let row_b = b.index_axis(Axis(1), j);
    product_with(a, i, row_b.row(0), row_b.row(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::codes;

    #[test]
    fn test_anticommuting_tableau_is_reported() -> Result<(), LogicalError> {
        let tableau = StabilizerTableau::new(&["XI", "ZI"])?;
        assert!(matches!(
            check_stabilizers_commute(&tableau),
            Err(LogicalError::Construction { .. })
        ));
        let (steane, _) = codes::steane()?;
        check_stabilizers_commute(&steane)
    }

    #[test]
    fn test_normalization() {
        let half = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        assert!(check_normalization(&[half, half], None).is_ok());
        assert!(check_normalization(&[half, Complex::new(0.0, 0.0)], None).is_err());
    }
}
