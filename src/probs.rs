//! Utilities for working with probabilities.

pub trait SliceExt {
    fn sum(&self) -> f64;

    /// Scales the slice so that it sums to `target`, returning the pre-normalisation sum.
    fn normalise(&mut self, target: f64) -> f64;

    fn scale(&mut self, factor: f64);
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    fn normalise(&mut self, target: f64) -> f64 {
        let sum = self.sum();
        self.scale(target / sum);
        sum
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn sum() {
        let data = [0.0, 0.1, 0.2];
        assert_f64_near!(0.3, data.sum(), 1);
    }

    #[test]
    fn normalise() {
        let mut data = [0.05, 0.1, 0.15, 0.2];
        let sum = data.normalise(1.0);
        assert_f64_near!(0.5, sum, 1);
        assert_slice_f64_near(&[0.1, 0.2, 0.3, 0.4], &data, 1);
    }

    #[test]
    fn scale() {
        let mut data = [0.1, 0.2, 0.3];
        data.scale(2.0);
        assert_slice_f64_near(&[0.2, 0.4, 0.6], &data, 1);
    }

    fn assert_slice_f64_near(expected: &[f64], actual: &[f64], distance: u32) {
        assert_eq!(
            expected.len(),
            actual.len(),
            "lengths do not match: {} ≠ {}",
            expected.len(),
            actual.len()
        );
        for (index, &value) in expected.iter().enumerate() {
            assert_f64_near!(value, actual[index], distance);
        }
    }
}
