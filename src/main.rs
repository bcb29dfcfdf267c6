// greencore is a pipeline worker for copy/delete/share operations over a
// project's hierarchical object store.
// Copyright (C) 2026  greencore contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use greencore::cli::{Cli, Command};
use greencore::config::Config;
use greencore::{drivers, logging, ui};

fn run(args: &Cli) -> Result<()> {
    match &args.command {
        Command::Copy(cmd_args) => drivers::copy::run(cmd_args),
        Command::Delete(cmd_args) => drivers::delete::run(cmd_args),
        Command::ShareDatasetVersion(cmd_args) => drivers::share::run(cmd_args),
    }
}

fn main() {
    let args = Cli::parse();

    if let Ok(config) = Config::load() {
        logging::init(&config);
    }

    if let Err(e) = run(&args) {
        ui::log_error(e.to_string().as_str());
        std::process::exit(1);
    }

    println!("{}", "Finished".bold().green());
}
