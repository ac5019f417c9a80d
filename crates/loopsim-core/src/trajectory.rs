//! Recorded simulation output

use std::io::{self, Write};
use std::path::Path;

/// Plant position after each step, in step order
///
/// Sample `k` belongs to time `t_k = k * dt`. A trajectory is immutable
/// once the simulation that produced it returns.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    dt: f64,
    samples: Vec<f64>,
}

impl Trajectory {
    pub(crate) fn new(dt: f64, samples: Vec<f64>) -> Self {
        Self { dt, samples }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn get(&self, k: usize) -> Option<f64> {
        self.samples.get(k).copied()
    }

    #[inline]
    pub fn time_at(&self, k: usize) -> f64 {
        k as f64 * self.dt
    }

    /// Iterate over `(t_k, position_k)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(|(k, &x)| (self.time_at(k), x))
    }

    /// Last recorded sample
    pub fn final_value(&self) -> Option<f64> {
        self.samples.last().copied()
    }

    /// True if every sample is finite
    ///
    /// A false value means the recurrence diverged; see the notes on
    /// step size in [`crate::SecondOrderPlant`].
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|x| x.is_finite())
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Save as two-column CSV (`time [s]`, `label`)
    ///
    /// Adds a `.csv` extension if the path has none.
    pub fn save_csv(&self, path: impl AsRef<Path>, label: &str) -> io::Result<()> {
        let file = std::fs::File::create(csv_path(path.as_ref()))?;
        self.write_csv(file, label)
    }

    pub fn write_csv<W: Write>(&self, writer: W, label: &str) -> io::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([TIME_HEADER, label])?;
        for (t, x) in self.iter() {
            wtr.write_record([t.to_string(), x.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl AsRef<[f64]> for Trajectory {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

/// Header of the time column in every CSV export
pub const TIME_HEADER: &str = "time [s]";

/// Append `.csv` unless the path already has that extension
pub(crate) fn csv_path(path: &Path) -> std::path::PathBuf {
    let has_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if has_csv {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".csv");
        name.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_mapping() {
        let traj = Trajectory::new(0.5, vec![1.0, 2.0, 3.0]);
        let pairs: Vec<_> = traj.iter().collect();
        assert_eq!(pairs, vec![(0.0, 1.0), (0.5, 2.0), (1.0, 3.0)]);
        assert_eq!(traj.final_value(), Some(3.0));
        assert_eq!(traj.get(3), None);
    }

    #[test]
    fn test_is_finite() {
        assert!(Trajectory::new(0.1, vec![0.0, 1.0]).is_finite());
        assert!(!Trajectory::new(0.1, vec![0.0, f64::NAN]).is_finite());
        assert!(!Trajectory::new(0.1, vec![f64::INFINITY]).is_finite());
    }

    #[test]
    fn test_write_csv() {
        let traj = Trajectory::new(0.5, vec![0.0, 0.25]);
        let mut buffer = Vec::new();
        traj.write_csv(&mut buffer, "P").unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["time [s],P", "0,0", "0.5,0.25"]);
    }

    #[test]
    fn test_csv_path_extension() {
        assert_eq!(csv_path(Path::new("out")), Path::new("out.csv"));
        assert_eq!(csv_path(Path::new("out.CSV")), Path::new("out.CSV"));
        assert_eq!(csv_path(Path::new("dir/out.txt")), Path::new("dir/out.txt.csv"));
    }
}
