//! An application for reading MGH file meta-data.

extern crate mgh;

use mgh::InMemMghObject;
use std::env;

fn main() {
    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to MGH file is required");
    let obj = InMemMghObject::from_file(filename).expect("Failed to read MGH file");
    let header = obj.header();
    println!("{:#?}", header);
    println!("orientation: {}", header.orientation());
    let ras = header.ras_geometry();
    println!("RAS center: {:?}", ras.center);
    for (tag, value) in obj.scan_parameters().iter() {
        println!("{}: {}", tag, value);
    }
}
