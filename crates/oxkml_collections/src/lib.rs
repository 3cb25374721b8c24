//! Collections of data and types for KML
//!
//! The tables here describe which elements exist, which groups they belong to, which
//! children they accept and in which order, and which values their simple fields hold.
//! Nothing in this crate is mutable after the first lookup.

#[macro_use]
extern crate bitflags;

pub mod attribute;
pub mod element;
pub mod schema;
pub mod value;

#[cfg(test)]
#[ctor::ctor]
fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}
