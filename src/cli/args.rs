//! Command-line argument definitions.

use clap::{ArgAction, Parser};

use crate::state::Selection;

/// reconflow - sequential recon pipeline over subfinder, httpx, nuclei, naabu and friends
///
/// Stages always run in the order subdomains, live hosts, nuclei, ports,
/// endpoints, whatever order the flags are given in. Results land in
/// `output/<stage>_<YYYY-MM-DD>.txt`.
#[derive(Parser, Debug)]
#[command(version, about, long_about, disable_help_flag = true)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Domain, URL, or path to a file with one domain per line
    pub input: Option<String>,

    /// Enumerate subdomains (subfinder, assetfinder, sublist3r, findomain, chaos)
    #[arg(short = 's', long)]
    pub subdomains: bool,

    /// Probe live hosts with httpx
    #[arg(short = 'h', long)]
    pub httpx: bool,

    /// Run nuclei templates against live hosts
    #[arg(short = 'n', long)]
    pub nuclei: bool,

    /// Scan ports with naabu
    #[arg(short = 'p', long)]
    pub ports: bool,

    /// Discover endpoints (katana, waybackurls)
    #[arg(short = 'e', long)]
    pub endpoints: bool,

    /// Empty the output directory
    #[arg(short = 'c', long)]
    pub clean: bool,

    /// Diff today's subdomains against the most recent prior run
    #[arg(short = 'o', long)]
    pub compare: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl Args {
    /// Operations selected by the flags.
    pub fn selection(&self) -> Selection {
        Selection {
            subdomains: self.subdomains,
            live_hosts: self.httpx,
            nuclei: self.nuclei,
            ports: self.ports,
            endpoints: self.endpoints,
            clean: self.clean,
            compare: self.compare,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Stage;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from(["reconflow", "example.com", "-h", "-s", "-e"]).unwrap();
        assert_eq!(args.input.as_deref(), Some("example.com"));
        assert_eq!(
            args.selection().stages(),
            vec![Stage::Subdomains, Stage::LiveHosts, Stage::Endpoints]
        );
    }

    #[test]
    fn test_combined_short_flags() {
        let args = Args::try_parse_from(["reconflow", "-snp", "example.com"]).unwrap();
        assert_eq!(
            args.selection().stages(),
            vec![Stage::Subdomains, Stage::Nuclei, Stage::Ports]
        );
    }

    #[test]
    fn test_long_flags() {
        let args = Args::try_parse_from(["reconflow", "--clean", "--compare"]).unwrap();
        let selection = args.selection();
        assert!(selection.clean);
        assert!(selection.compare);
        assert!(!selection.has_stages());
        assert!(args.input.is_none());
    }

    #[test]
    fn test_flags_take_no_values() {
        let args = Args::try_parse_from(["reconflow", "-s", "example.com"]).unwrap();
        assert!(args.subdomains);
        assert_eq!(args.input.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_long_help() {
        let err = Args::try_parse_from(["reconflow", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
