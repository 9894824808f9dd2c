use tkbt_core::settings::settings;

use crate::pos::{JishoClient, PosLookup};

pub fn pos_cmd(word: &str) {
    let client = JishoClient::from_settings(&settings().pos);
    let pos = die!(client.parts_of_speech(word), "Error: {}");
    println!("{pos}");
}
