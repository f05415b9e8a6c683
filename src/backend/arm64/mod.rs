pub mod assembly_emitter;
pub mod immediate;

pub use assembly_emitter::Arm64DarwinEmitter;
