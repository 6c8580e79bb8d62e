//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// Generational: a destroyed entity's id is never mistaken for a later one.
    pub struct Entity;
}
