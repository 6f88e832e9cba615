// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::Engine;
use clap::Parser;
use rand::RngCore;

/// Generate a random token signing secret
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Secret length in bytes, before base64 encoding
    #[clap(long, default_value = "48")]
    length: usize,

    /// Also write the secret to this file
    #[clap(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.length < 32 {
        anyhow::bail!("A signing secret needs at least 32 bytes");
    }

    let mut secret = vec![0u8; args.length];
    rand::rng().fill_bytes(&mut secret);
    let encoded = base64::engine::general_purpose::STANDARD.encode(&secret);

    if let Some(path) = &args.out {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create secret file at {:?}", path))?;
        file.write_all(encoded.as_bytes())
            .context("Failed to write secret to file")?;
        eprintln!("Secret written to {:?}", path);
    }

    println!("{}", encoded);
    Ok(())
}
