pub mod auditoria;
pub mod identifiable;
pub mod usuario;

pub use auditoria::*;
pub use identifiable::*;
pub use usuario::*;
