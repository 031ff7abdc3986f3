/// `n` evenly spaced values from `start` to `end`, both included.
pub fn linspace<T>(start: T, end: T, n: usize) -> na::DVector<T>
where
  T: num_traits::Float + na::Scalar,
{
  match n {
    0 => na::DVector::from_vec(Vec::new()),
    1 => na::DVector::from_element(1, start),
    _ => {
      let nsteps = T::from(n - 1).unwrap_or_else(T::one);
      let step = (end - start) / nsteps;
      na::DVector::from_iterator(
        n,
        (0..n).map(|i| {
          if i == n - 1 {
            end
          } else {
            start + step * T::from(i).unwrap_or_else(T::zero)
          }
        }),
      )
    }
  }
}

#[cfg(test)]
mod tests {
  use super::linspace;

  #[test]
  fn linspace_endpoints() {
    let xs = linspace(0.0, 1.0, 5);
    assert_eq!(xs.len(), 5);
    assert_eq!(xs[0], 0.0);
    assert_eq!(xs[2], 0.5);
    assert_eq!(xs[4], 1.0);
  }

  #[test]
  fn linspace_degenerate() {
    assert_eq!(linspace(0.0, 1.0, 0).len(), 0);
    assert_eq!(linspace(2.0, 1.0, 1)[0], 2.0);
  }
}
