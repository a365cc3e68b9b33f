mod seed;

pub use self::seed::SeedRepository;
