//! Pipeline stage and artifact types.

/// Output artifact kinds, one dated file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Subdomains,
    LiveSubdomains,
    NucleiResults,
    Ports,
    Endpoints,
    NewSubdomains,
}

impl Artifact {
    /// File-name prefix, joined with the date as `<prefix>_<YYYY-MM-DD>.txt`.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Subdomains => "subdomains",
            Self::LiveSubdomains => "live_subdomains",
            Self::NucleiResults => "nuclei_results",
            Self::Ports => "ports",
            Self::Endpoints => "endpoints",
            Self::NewSubdomains => "new_subdomains",
        }
    }
}

/// The five tool-backed stages.
///
/// Declaration order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Subdomains,
    LiveHosts,
    Nuclei,
    Ports,
    Endpoints,
}

impl Stage {
    /// Every stage in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::Subdomains,
        Stage::LiveHosts,
        Stage::Nuclei,
        Stage::Ports,
        Stage::Endpoints,
    ];

    /// Artifact this stage appends to.
    #[must_use]
    pub const fn artifact(self) -> Artifact {
        match self {
            Self::Subdomains => Artifact::Subdomains,
            Self::LiveHosts => Artifact::LiveSubdomains,
            Self::Nuclei => Artifact::NucleiResults,
            Self::Ports => Artifact::Ports,
            Self::Endpoints => Artifact::Endpoints,
        }
    }

    /// Whether the artifact gets a sort-unique pass after the stage.
    #[must_use]
    pub const fn dedupes(self) -> bool {
        matches!(self, Self::Subdomains | Self::Endpoints)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Subdomains => write!(f, "subdomains"),
            Stage::LiveHosts => write!(f, "live hosts"),
            Stage::Nuclei => write!(f, "nuclei"),
            Stage::Ports => write!(f, "ports"),
            Stage::Endpoints => write!(f, "endpoints"),
        }
    }
}

/// Operations selected on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Selection {
    pub subdomains: bool,
    pub live_hosts: bool,
    pub nuclei: bool,
    pub ports: bool,
    pub endpoints: bool,
    pub clean: bool,
    pub compare: bool,
}

impl Selection {
    /// Selected stages in fixed execution order, whatever the flag order was.
    #[must_use]
    pub fn stages(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|stage| self.includes(*stage))
            .collect()
    }

    #[must_use]
    pub const fn includes(&self, stage: Stage) -> bool {
        match stage {
            Stage::Subdomains => self.subdomains,
            Stage::LiveHosts => self.live_hosts,
            Stage::Nuclei => self.nuclei,
            Stage::Ports => self.ports,
            Stage::Endpoints => self.endpoints,
        }
    }

    /// True if any tool-backed stage is selected.
    #[must_use]
    pub fn has_stages(&self) -> bool {
        Stage::ALL.into_iter().any(|stage| self.includes(stage))
    }

    /// True if anything at all is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_stages() && !self.clean && !self.compare
    }
}
