//! Bilingual (English/French) label tables for the report.
//!
//! Static str → str mappings; a field with no entry falls back to its raw
//! schema name so a registry addition never renders an empty header.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Fr,
}

impl Lang {
    /// Parse a `lang` query parameter / CLI flag; unknown codes fall back
    /// to English.
    pub fn from_code(code: &str) -> Self {
        match code {
            "fr" => Lang::Fr,
            _ => Lang::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }
}

/// Column header label for a schema field name.
pub fn field_label(lang: Lang, field: &str) -> &str {
    let label = match lang {
        Lang::En => match field {
            "offset" => "Offset",
            "banner" => "Banner",
            "pid" => "PID",
            "tid" => "TID",
            "ppid" => "PPID",
            "comm" => "Process",
            "creation_time" => "Creation time",
            "file_output" => "File output",
            "args" => "Arguments",
            "key" => "Variable",
            "value" => "Value",
            "netns" => "Net NS",
            "index" => "Index",
            "interface" => "Interface",
            "mac" => "MAC",
            "promiscuous" => "Promiscuous",
            "ip" => "IP",
            "prefix" => "Prefix",
            "scope" => "Scope",
            "state" => "State",
            "name" => "Name",
            "size" => "Size",
            "command_time" => "Command time",
            "command" => "Command",
            "family" => "Family",
            "type" => "Type",
            "proto" => "Protocol",
            "source_addr" => "Source address",
            "source_port" => "Source port",
            "dest_addr" => "Destination address",
            "dest_port" => "Destination port",
            "device" => "Device",
            "mount_point" => "Mount point",
            "fs_type" => "Filesystem",
            "options" => "Options",
            _ => "",
        },
        Lang::Fr => match field {
            "offset" => "Offset",
            "banner" => "Bannière",
            "pid" => "PID",
            "tid" => "TID",
            "ppid" => "PPID",
            "comm" => "Processus",
            "creation_time" => "Date de création",
            "file_output" => "Fichier de sortie",
            "args" => "Arguments",
            "key" => "Variable",
            "value" => "Valeur",
            "netns" => "NS réseau",
            "index" => "Index",
            "interface" => "Interface",
            "mac" => "MAC",
            "promiscuous" => "Promiscuité",
            "ip" => "IP",
            "prefix" => "Préfixe",
            "scope" => "Portée",
            "state" => "État",
            "name" => "Nom",
            "size" => "Taille",
            "command_time" => "Date de la commande",
            "command" => "Commande",
            "family" => "Famille",
            "type" => "Type",
            "proto" => "Protocole",
            "source_addr" => "Adresse source",
            "source_port" => "Port source",
            "dest_addr" => "Adresse de destination",
            "dest_port" => "Port de destination",
            "device" => "Périphérique",
            "mount_point" => "Point de montage",
            "fs_type" => "Système de fichiers",
            "options" => "Options",
            _ => "",
        },
    };
    if label.is_empty() {
        field
    } else {
        label
    }
}

/// Page-level UI strings.
pub fn ui_label(lang: Lang, key: &str) -> &'static str {
    match lang {
        Lang::En => match key {
            "title" => "Linux dump analysis",
            "system_info" => "System information",
            "distribution" => "Distribution",
            "kernel_version" => "Kernel version",
            "command" => "Extraction command",
            "analyzed_at" => "Analyzed at",
            "filter" => "Filter…",
            "no_analysis" => "No analysis has been run yet. Upload a dump first.",
            "unsupported" => "The output format of this command is not supported.",
            "empty_table" => "The extraction returned no rows.",
            _ => "",
        },
        Lang::Fr => match key {
            "title" => "Analyse de dump Linux",
            "system_info" => "Informations système",
            "distribution" => "Distribution",
            "kernel_version" => "Version du noyau",
            "command" => "Commande d'extraction",
            "analyzed_at" => "Analysé le",
            "filter" => "Filtrer…",
            "no_analysis" => "Aucune analyse n'a encore été effectuée. Uploadez d'abord un dump.",
            "unsupported" => "Le format de sortie de cette commande n'est pas pris en charge.",
            "empty_table" => "L'extraction n'a renvoyé aucune ligne.",
            _ => "",
        },
    }
}
