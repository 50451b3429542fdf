//! Named numeric constants.

use crate::ir::{ConstantDecl, Item};
use crate::naming;
use crate::schema::Schema;

pub fn synthesize(schema: &Schema) -> Vec<Item> {
    schema
        .constants()
        .iter()
        .map(|c| {
            Item::Constant(ConstantDecl {
                name: naming::constant(&c.name),
                value: c.value,
                class: c.class.clone(),
            })
        })
        .collect()
}
