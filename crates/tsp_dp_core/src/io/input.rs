use std::{fmt, fs, io::Read};

use tsp_dp_derive::KvDisplay;

use crate::{DistanceMatrix, Result, SolverOptions, options::InputSource};

/// Where an instance came from, kept for logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstanceOrigin {
    Random { seed: Option<u64> },
    Stdin,
    File(String),
}

impl fmt::Display for InstanceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random { seed: Some(seed) } => write!(f, "random(seed={seed})"),
            Self::Random { seed: None } => f.write_str("random(unseeded)"),
            Self::Stdin => f.write_str("stdin"),
            Self::File(path) => f.write_str(path),
        }
    }
}

/// One problem instance ready to solve.
#[derive(Clone, Debug, KvDisplay)]
pub struct SolverInput {
    pub(crate) origin: InstanceOrigin,
    #[kv(name = "cities", fmt = "len")]
    pub(crate) matrix: DistanceMatrix,
}

impl SolverInput {
    pub fn new(origin: InstanceOrigin, matrix: DistanceMatrix) -> Self {
        Self { origin, matrix }
    }

    /// Reads the matrix named by `--input`, or generates one from the cost range and seed.
    pub fn from_options(options: &SolverOptions) -> Result<Self> {
        match options.input_source() {
            InputSource::Random => {
                let matrix = match options.seed {
                    Some(seed) => {
                        DistanceMatrix::random_seeded(options.cities, options.cost_range(), seed)?
                    }
                    None => DistanceMatrix::random(
                        options.cities,
                        options.cost_range(),
                        &mut rand::rng(),
                    )?,
                };
                Ok(Self::new(InstanceOrigin::Random { seed: options.seed }, matrix))
            }
            InputSource::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(Self::new(InstanceOrigin::Stdin, DistanceMatrix::parse(&text)?))
            }
            InputSource::File(path) => {
                let text = fs::read_to_string(path)?;
                Ok(Self::new(
                    InstanceOrigin::File(path.display().to_string()),
                    DistanceMatrix::parse(&text)?,
                ))
            }
        }
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn origin(&self) -> &InstanceOrigin {
        &self.origin
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::{InstanceOrigin, SolverInput};
    use crate::{DistanceMatrix, Error, SolverOptions, matrix::square};

    fn unique_temp_file(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("tsp-dp-tests-{name}-{nanos}.txt"))
    }

    #[test]
    fn seeded_random_input_is_reproducible() {
        let options = SolverOptions {
            cities: 5,
            seed: Some(3),
            ..SolverOptions::default()
        };
        let a = SolverInput::from_options(&options).expect("input");
        let b = SolverInput::from_options(&options).expect("input");

        assert_eq!(a.matrix(), b.matrix());
        assert_eq!(a.origin(), &InstanceOrigin::Random { seed: Some(3) });
        assert_eq!(
            a.matrix(),
            &DistanceMatrix::random_seeded(5, 1..=10, 3).expect("matrix")
        );
    }

    #[test]
    fn unseeded_random_input_uses_default_shape() {
        let input = SolverInput::from_options(&SolverOptions::default()).expect("input");
        let matrix = input.matrix();
        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            for j in 0..3 {
                let cost = matrix.get(i, j);
                assert!(if i == j { cost == 0 } else { (1..=10).contains(&cost) });
            }
        }
    }

    #[test]
    fn random_input_rejects_oversized_city_count() {
        let options = SolverOptions {
            cities: 64,
            ..SolverOptions::default()
        };
        let err = SolverInput::from_options(&options).expect_err("too many cities");
        assert!(matches!(err, Error::InvalidCityCount { count: 64, .. }));
    }

    #[test]
    fn file_input_is_parsed() {
        let path = unique_temp_file("matrix");
        fs::write(&path, "0 1 2\n1 0 3\n2 3 0\n").expect("write matrix");

        let options = SolverOptions {
            input: path.display().to_string(),
            ..SolverOptions::default()
        };
        let input = SolverInput::from_options(&options).expect("input");
        fs::remove_file(&path).expect("cleanup temp file");

        assert_eq!(input.matrix(), &square([[0, 1, 2], [1, 0, 3], [2, 3, 0]]));
        assert_eq!(input.origin(), &InstanceOrigin::File(path.display().to_string()));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let options = SolverOptions {
            input: unique_temp_file("missing").display().to_string(),
            ..SolverOptions::default()
        };
        let err = SolverInput::from_options(&options).expect_err("missing file");
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn display_reports_origin_and_city_count() {
        let input = SolverInput::new(
            InstanceOrigin::Random { seed: Some(9) },
            square([[0, 1], [1, 0]]),
        );
        let rendered = input.to_string();
        assert!(rendered.contains("random(seed=9)"));
        assert!(rendered.contains("cities = 2"));
    }
}
