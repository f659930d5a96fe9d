/// Trait for entities addressable by their surrogate integer key.
pub trait Identifiable {
    fn get_id(&self) -> i32;
}
