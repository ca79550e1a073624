use nalgebra::{Matrix3, Point3, Vector3};

/// A periodic lattice described by three lattice vectors in Angstrom.
///
/// The vectors are stored as the rows of a 3x3 matrix, so a fractional coordinate
/// row vector `f` maps to Cartesian space as `f * M`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    matrix: Matrix3<f64>,
}

impl Lattice {
    pub fn new(matrix: Matrix3<f64>) -> Self {
        Self { matrix }
    }

    pub fn from_vectors(vectors: [[f64; 3]; 3]) -> Self {
        Self::new(Matrix3::from_row_slice(&[
            vectors[0][0],
            vectors[0][1],
            vectors[0][2],
            vectors[1][0],
            vectors[1][1],
            vectors[1][2],
            vectors[2][0],
            vectors[2][1],
            vectors[2][2],
        ]))
    }

    pub fn cubic(a: f64) -> Self {
        Self::new(Matrix3::from_diagonal_element(a))
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Returns the lattice vector with the given index (0, 1 or 2).
    pub fn vector(&self, index: usize) -> Vector3<f64> {
        self.matrix.row(index).transpose()
    }

    pub fn vectors(&self) -> [[f64; 3]; 3] {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.matrix[(i, j)];
            }
        }
        out
    }

    /// Lattice parameters a, b and c.
    pub fn lengths(&self) -> [f64; 3] {
        [0, 1, 2].map(|i| self.vector(i).norm())
    }

    /// Lattice angles alpha, beta and gamma in degrees.
    pub fn angles(&self) -> [f64; 3] {
        let [a, b, c] = [0, 1, 2].map(|i| self.vector(i));
        [angle_between(&b, &c), angle_between(&a, &c), angle_between(&a, &b)]
    }

    /// Cell volume in cubic Angstrom. Always non-negative.
    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    pub fn fractional_to_cartesian(&self, frac: &Vector3<f64>) -> Point3<f64> {
        Point3::from(self.matrix.transpose() * frac)
    }

    /// Returns `None` when the lattice vectors are linearly dependent.
    pub fn cartesian_to_fractional(&self, cart: &Point3<f64>) -> Option<Vector3<f64>> {
        let inverse = self.matrix.transpose().try_inverse()?;
        Some(inverse * cart.coords)
    }
}

fn angle_between(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    let denom = u.norm() * v.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (u.dot(v) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    #[test]
    fn from_vectors_keeps_vectors_as_rows() {
        let lattice = Lattice::from_vectors([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(lattice.vector(1), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(lattice.vectors()[2], [7.0, 8.0, 9.0]);
    }

    #[test]
    fn cubic_lattice_has_expected_parameters() {
        let lattice = Lattice::cubic(10.858716);
        for length in lattice.lengths() {
            assert!((length - 10.858716).abs() < TOLERANCE);
        }
        for angle in lattice.angles() {
            assert!((angle - 90.0).abs() < TOLERANCE);
        }
        assert!((lattice.volume() - 10.858716f64.powi(3)).abs() < 1e-8);
    }

    #[test]
    fn hexagonal_gamma_is_120_degrees() {
        let a = 3.0;
        let lattice = Lattice::from_vectors([
            [a, 0.0, 0.0],
            [-a / 2.0, a * 3f64.sqrt() / 2.0, 0.0],
            [0.0, 0.0, 5.0],
        ]);
        let [alpha, beta, gamma] = lattice.angles();
        assert!((alpha - 90.0).abs() < 1e-9);
        assert!((beta - 90.0).abs() < 1e-9);
        assert!((gamma - 120.0).abs() < 1e-9);
    }

    #[test]
    fn fractional_and_cartesian_conversions_are_inverse() {
        let lattice = Lattice::from_vectors([[4.0, 0.0, 0.0], [1.0, 5.0, 0.0], [0.5, 0.5, 6.0]]);
        let frac = Vector3::new(0.25, 0.5, 0.75);
        let cart = lattice.fractional_to_cartesian(&frac);
        assert!((cart - Point3::new(1.0 + 0.5 + 0.375, 2.5 + 0.375, 4.5)).norm() < TOLERANCE);
        let back = lattice.cartesian_to_fractional(&cart).unwrap();
        assert!((back - frac).norm() < TOLERANCE);
    }

    #[test]
    fn singular_lattice_has_no_fractional_coordinates() {
        let lattice = Lattice::from_vectors([[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(lattice.volume(), 0.0);
        assert!(lattice.cartesian_to_fractional(&Point3::origin()).is_none());
    }
}
