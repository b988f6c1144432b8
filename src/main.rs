use std::io::{self, Read};

use xp_doc2html::{Attributes, Converter, DefaultAttributes};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut md = String::new();
    io::stdin().read_to_string(&mut md)?;

    let converter = Converter::new(".", DefaultAttributes::default())?;

    println!("{}", converter.render_str(&md, &Attributes::new())?);

    converter.shutdown();

    Ok(())
}
