// Tests for posekit-data: MixedDataset sampling policy, loader wiring

use rand::rngs::StdRng;
use rand::SeedableRng;

use posekit_data::{
    DataError, InMemoryDataset, MixSpec, MixedDataset, PoseDataset, PoseSample, Result,
    SourceConfig, SourceLoader, DEFAULT_SOURCES,
};

// Simple fixed-length source whose samples record their index

struct ToySource {
    n: usize,
    source_name: String,
}

impl ToySource {
    fn boxed(name: &str, n: usize) -> Box<dyn PoseDataset> {
        Box::new(Self {
            n,
            source_name: name.to_string(),
        })
    }
}

impl PoseDataset for ToySource {
    fn len(&self) -> usize {
        self.n
    }

    fn get(&self, index: usize) -> Result<PoseSample> {
        if index >= self.n {
            return Err(DataError::IndexOutOfRange {
                source_name: self.source_name.clone(),
                index,
                len: self.n,
            });
        }
        Ok(PoseSample {
            image: vec![index as f32],
            image_shape: [1, 1, 1],
            keypoints_2d: vec![[0.0, 0.0, 1.0]],
            keypoints_3d: Vec::new(),
            pose: vec![0.0; 72],
            betas: vec![0.0; 10],
            has_smpl: false,
            source: self.source_name.clone(),
        })
    }

    fn name(&self) -> &str {
        &self.source_name
    }
}

fn reference_mix() -> MixedDataset {
    let sources = vec![
        ToySource::boxed("h36m", 100),
        ToySource::boxed("lsp-orig", 10),
        ToySource::boxed("mpii", 20),
        ToySource::boxed("lspet", 5),
        ToySource::boxed("coco", 50),
        ToySource::boxed("mpi-inf-3dhp", 3),
    ];
    MixedDataset::from_sources(sources, MixSpec::default()).unwrap()
}

// Loader wiring

struct ToyLoader;

impl SourceLoader for ToyLoader {
    fn load(&self, _config: &SourceConfig, name: &str) -> Result<Box<dyn PoseDataset>> {
        let n = match name {
            "h36m" => 100,
            "lsp-orig" => 10,
            "mpii" => 20,
            "lspet" => 5,
            "coco" => 50,
            "mpi-inf-3dhp" => 3,
            other => return Err(DataError::UnknownSource(other.to_string())),
        };
        Ok(ToySource::boxed(name, n))
    }
}

#[test]
fn test_default_sources_build_in_order() {
    let config = SourceConfig::default();
    let mixed = MixedDataset::with_default_sources(&config, &ToyLoader).unwrap();
    assert_eq!(mixed.sources().len(), 6);
    for (i, name) in DEFAULT_SOURCES.iter().enumerate() {
        assert_eq!(mixed.sources()[i].name(), *name);
        assert_eq!(mixed.index_of(name), Some(i));
    }
    assert_eq!(mixed.len(), 100);
}

#[test]
fn test_loader_failure_is_fatal() {
    let config = SourceConfig::default();
    let err = MixedDataset::new(&config, &ToyLoader, &["h36m", "3dpw", "coco"], MixSpec::default())
        .unwrap_err();
    assert!(matches!(err, DataError::UnknownSource(n) if n == "3dpw"));
}

// Lookup behaviour

#[test]
fn test_lookup_wraps_short_sources() {
    let mixed = reference_mix();
    // Force the tail source (len 3) with a draw in its bucket; index 7
    // must wrap to 7 % 3 = 1.
    let tail = &mixed.sources()[mixed.select(0.95)];
    assert_eq!(tail.name(), "mpi-inf-3dhp");
    for i in 0..20usize {
        let s = tail.get(i % tail.len()).unwrap();
        assert_eq!(s.image[0], (i % 3) as f32);
    }
}

#[test]
fn test_get_within_reported_length_always_succeeds() {
    let mixed = reference_mix();
    let mut rng = StdRng::seed_from_u64(7);
    for i in 0..mixed.len() {
        let sample = mixed.get_with(i, &mut rng).unwrap();
        assert!(mixed.index_of(&sample.source).is_some());
    }
}

#[test]
fn test_seeded_lookup_is_reproducible() {
    let mixed = reference_mix();
    for index in [0usize, 17, 99] {
        let a = mixed.get_seeded(index, 42).unwrap();
        let b = mixed.get_seeded(index, 42).unwrap();
        assert_eq!(a.source, b.source);
        assert_eq!(a.image, b.image);
    }
}

#[test]
fn test_seeded_stream_is_reproducible() {
    let mixed = reference_mix();
    let mut rng1 = StdRng::seed_from_u64(123);
    let mut rng2 = StdRng::seed_from_u64(123);
    for i in 0..50 {
        let a = mixed.get_with(i, &mut rng1).unwrap();
        let b = mixed.get_with(i, &mut rng2).unwrap();
        assert_eq!(a.source, b.source);
    }
}

// Statistical property: empirical frequencies match the partition

#[test]
fn test_selection_frequencies_converge() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mixed = reference_mix();
    let n = 100_000usize;
    let mut rng = StdRng::seed_from_u64(2024);
    let mut counts = vec![0usize; mixed.partition().len()];
    for i in 0..n {
        let s = mixed.get_with(i, &mut rng).unwrap();
        counts[mixed.index_of(&s.source).unwrap()] += 1;
    }

    let mut prev = 0.0;
    for (i, &bound) in mixed.partition().iter().enumerate() {
        let expected = bound - prev;
        let observed = counts[i] as f64 / n as f64;
        assert!(
            (observed - expected).abs() < 0.01,
            "source {i}: observed {observed:.4}, expected {expected:.4}"
        );
        prev = bound;
    }
}

// MixedDataset is itself a PoseDataset

#[test]
fn test_mixed_dataset_as_trait_object() {
    let mixed = reference_mix();
    let ds: &dyn PoseDataset = &mixed;
    assert_eq!(ds.name(), "mixed");
    assert_eq!(ds.len(), 100);
    assert!(!ds.is_empty());
    ds.get(0).unwrap();
}

// InMemoryDataset

#[test]
fn test_in_memory_dataset() {
    let samples: Vec<PoseSample> = (0..4)
        .map(|i| PoseSample {
            image: vec![i as f32; 3],
            image_shape: [3, 1, 1],
            keypoints_2d: Vec::new(),
            keypoints_3d: Vec::new(),
            pose: Vec::new(),
            betas: Vec::new(),
            has_smpl: false,
            source: "mem".to_string(),
        })
        .collect();
    let ds = InMemoryDataset::new(samples, "mem");
    assert_eq!(ds.len(), 4);
    assert_eq!(ds.get(2).unwrap().image, vec![2.0; 3]);
    let err = ds.get(4).unwrap_err();
    assert!(matches!(err, DataError::IndexOutOfRange { index: 4, .. }));
}
