pub mod auditoria;
pub mod descripcion;
pub mod filtros;
pub mod rango;
pub mod usuario;

pub use auditoria::*;
pub use descripcion::*;
pub use filtros::*;
pub use rango::*;
pub use usuario::*;
