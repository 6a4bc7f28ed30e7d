mod mocks;

mod replicator;
