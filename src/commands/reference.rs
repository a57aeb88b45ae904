//! Built-in quick reference for common `zpool` / `zfs` commands.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Pool,
    Dataset,
    Snapshot,
    Properties,
    Maintenance,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::All, Category::Pool, Category::Dataset,
        Category::Snapshot, Category::Properties, Category::Maintenance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::All         => "All Commands",
            Category::Pool        => "Pool Management",
            Category::Dataset     => "Dataset Operations",
            Category::Snapshot    => "Snapshots & Clones",
            Category::Properties  => "Properties & Settings",
            Category::Maintenance => "Maintenance & Repair",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "all"         => Some(Category::All),
            "pool"        => Some(Category::Pool),
            "dataset"     => Some(Category::Dataset),
            "snapshot"    => Some(Category::Snapshot),
            "properties"  => Some(Category::Properties),
            "maintenance" => Some(Category::Maintenance),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Example {
    pub cmd:  &'static str,
    pub desc: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RefEntry {
    pub command:     &'static str,
    pub syntax:      &'static str,
    pub category:    Category,
    pub description: &'static str,
    pub manpage:     &'static str,
    pub examples:    &'static [Example],
}

const fn ex(cmd: &'static str, desc: &'static str) -> Example {
    Example { cmd, desc }
}

pub static COMMANDS: &[RefEntry] = &[
    RefEntry {
        command: "zpool status",
        syntax: "zpool status [pool_name]",
        category: Category::Pool,
        description: "Display the detailed status of storage pools, including health, errors and the state of each device.",
        manpage: "Shows the status of all pools, or of the named pool. Includes read, write and checksum error counters.",
        examples: &[
            ex("zpool status", "Show status of all pools"),
            ex("zpool status tank", "Show status of pool \"tank\""),
            ex("zpool status -v", "Verbose status including error logs"),
        ],
    },
    RefEntry {
        command: "zpool list",
        syntax: "zpool list [options] [pool_name]",
        category: Category::Pool,
        description: "List storage pools with size, used space and health.",
        manpage: "Lists the given pools with a health status and space usage. With no arguments all pools are listed.",
        examples: &[
            ex("zpool list", "List all pools"),
            ex("zpool list -v", "List pools with their components"),
            ex("zpool list -o name,size,free", "List only selected properties"),
        ],
    },
    RefEntry {
        command: "zpool create",
        syntax: "zpool create [options] pool_name vdev_spec...",
        category: Category::Pool,
        description: "Create a new storage pool from the given virtual devices (vdevs).",
        manpage: "Creates a pool containing the vdevs given on the command line. The name must begin with a letter and may contain alphanumerics, underscore, dash, colon, space and period.",
        examples: &[
            ex("zpool create tank /dev/sda /dev/sdb", "Striped pool of two disks"),
            ex("zpool create tank mirror /dev/sda /dev/sdb", "Mirrored pool"),
            ex("zpool create -f tank raidz2 /dev/sda /dev/sdb /dev/sdc /dev/sdd", "Force creation of a RAIDZ2 pool"),
        ],
    },
    RefEntry {
        command: "zpool destroy",
        syntax: "zpool destroy [-f] pool_name",
        category: Category::Pool,
        description: "Destroy a storage pool and free its devices for other uses.",
        manpage: "Destroys the pool, freeing its devices. Active datasets are unmounted first.",
        examples: &[
            ex("zpool destroy tank", "Destroy pool \"tank\""),
            ex("zpool destroy -f tank", "Force destroy even if datasets are busy"),
        ],
    },
    RefEntry {
        command: "zpool scrub",
        syntax: "zpool scrub [-s] pool_name",
        category: Category::Maintenance,
        description: "Verify every block in the pool and repair detected errors where redundancy allows.",
        manpage: "Begins a scrub, which checks that all data checksums correctly. Mirror and raidz devices are repaired automatically.",
        examples: &[
            ex("zpool scrub tank", "Start a scrub on \"tank\""),
            ex("zpool scrub -s tank", "Stop a running scrub"),
        ],
    },
    RefEntry {
        command: "zfs list",
        syntax: "zfs list [options] [dataset_name]",
        category: Category::Dataset,
        description: "List datasets and properties such as space usage and mountpoints.",
        manpage: "Lists property information for the given datasets in tabular form, or for every dataset when none is given.",
        examples: &[
            ex("zfs list", "List all datasets"),
            ex("zfs list -r tank", "Recursively list datasets under \"tank\""),
            ex("zfs list -t snapshot", "List all snapshots"),
        ],
    },
    RefEntry {
        command: "zfs create",
        syntax: "zfs create [-p] [-o property=value]... dataset_name",
        category: Category::Dataset,
        description: "Create a dataset inside an existing pool, optionally setting properties.",
        manpage: "Creates a new file system. It is mounted automatically unless -u is given.",
        examples: &[
            ex("zfs create tank/data", "Dataset \"data\" in pool \"tank\""),
            ex("zfs create -p tank/data/documents", "Create missing parents too"),
            ex("zfs create -o compression=lz4 tank/logs", "Create with compression enabled"),
        ],
    },
    RefEntry {
        command: "zfs destroy",
        syntax: "zfs destroy [-fnpRrv] dataset_name[@snapshot_name]",
        category: Category::Dataset,
        description: "Destroy a dataset or snapshot, optionally with all descendants.",
        manpage: "Destroys the dataset. Shares are removed and mounts unmounted; datasets with dependents are refused unless forced.",
        examples: &[
            ex("zfs destroy tank/data", "Destroy dataset \"tank/data\""),
            ex("zfs destroy tank/data@snap1", "Destroy snapshot \"snap1\""),
            ex("zfs destroy -r tank/data", "Destroy dataset and all children"),
        ],
    },
    RefEntry {
        command: "zfs snapshot",
        syntax: "zfs snapshot [-r] dataset_name@snapshot_name",
        category: Category::Snapshot,
        description: "Create a point-in-time snapshot of a dataset, or of a whole subtree.",
        manpage: "Creates snapshots with the given names. Valid characters are alphanumerics, underscore, dash, colon, period and space; at most 256 characters.",
        examples: &[
            ex("zfs snapshot tank/data@backup", "Snapshot \"tank/data\" as \"backup\""),
            ex("zfs snapshot -r tank/data@daily", "Snapshot dataset and descendants"),
            ex("zfs snapshot tank/data@$(date +%Y-%m-%d)", "Date-based snapshot name"),
        ],
    },
    RefEntry {
        command: "zfs rollback",
        syntax: "zfs rollback [-rRf] dataset_name@snapshot_name",
        category: Category::Snapshot,
        description: "Roll a dataset back to a snapshot, discarding all later changes.",
        manpage: "Rolls back the dataset to a previous snapshot. Everything changed since that snapshot is discarded.",
        examples: &[
            ex("zfs rollback tank/data@yesterday", "Roll back to \"yesterday\""),
            ex("zfs rollback -r tank/data@yesterday", "Roll back, destroying later snapshots"),
        ],
    },
    RefEntry {
        command: "zfs clone",
        syntax: "zfs clone [-p] [-o property=value]... snapshot_name new_dataset_name",
        category: Category::Snapshot,
        description: "Create a writable dataset from a snapshot.",
        manpage: "Creates a clone of the snapshot: a writable file system or volume whose initial contents match the snapshot.",
        examples: &[
            ex("zfs clone tank/data@snap1 tank/data-clone", "Clone a snapshot"),
            ex("zfs clone -o compression=lz4 tank/vm@snap1 tank/vm-test", "Clone with compression enabled"),
        ],
    },
    RefEntry {
        command: "zfs send",
        syntax: "zfs send [-DvP] [-i snapshot] snapshot_name",
        category: Category::Snapshot,
        description: "Serialize a snapshot into a stream for backup or replication.",
        manpage: "Writes a stream representation of the snapshot to standard output, suitable for backups or sending to another pool.",
        examples: &[
            ex("zfs send tank/data@snap1 > backup.zfs", "Send a snapshot to a file"),
            ex("zfs send -i tank/data@snap1 tank/data@snap2", "Incremental stream between snapshots"),
            ex("zfs send -R tank/data@snap1", "Recursive stream with descendants"),
        ],
    },
    RefEntry {
        command: "zfs receive",
        syntax: "zfs receive [-vnFu] dataset_name",
        category: Category::Snapshot,
        description: "Receive a snapshot stream and recreate the snapshot locally.",
        manpage: "Creates a snapshot from the stream on standard input. A full stream also creates a new file system.",
        examples: &[
            ex("zfs receive tank/newdata < backup.zfs", "Receive from a file"),
            ex("zfs send tank/data@snap1 | ssh host zfs receive tank/data", "Replicate over SSH"),
            ex("zfs receive -F tank/data", "Force rollback to the latest snapshot first"),
        ],
    },
    RefEntry {
        command: "zfs get",
        syntax: "zfs get [-r|-d depth] [-Hp] [-o field[,...]] [-s source[,...]] [-t type[,...]] (all | property[,...]) [dataset_name...]",
        category: Category::Properties,
        description: "Show dataset properties: configuration, status and statistics.",
        manpage: "Displays properties for the given datasets, or for every dataset when none is given.",
        examples: &[
            ex("zfs get all tank/data", "All properties of \"tank/data\""),
            ex("zfs get compression,recordsize tank/data", "Selected properties"),
            ex("zfs get -r compression tank", "A property across descendants"),
        ],
    },
    RefEntry {
        command: "zfs set",
        syntax: "zfs set property=value dataset_name",
        category: Category::Properties,
        description: "Set a property on a dataset.",
        manpage: "Sets properties on each dataset. Only some properties are editable; see zfsprops(7).",
        examples: &[
            ex("zfs set compression=lz4 tank/data", "Enable LZ4 compression"),
            ex("zfs set quota=10G tank/data", "10 GB quota"),
            ex("zfs set recordsize=8K tank/database", "Small records for databases"),
        ],
    },
    RefEntry {
        command: "zfs upgrade",
        syntax: "zfs upgrade [-v] [-a | dataset_name]",
        category: Category::Maintenance,
        description: "Upgrade datasets to the newest on-disk version.",
        manpage: "Upgrades datasets to a newer on-disk version so that newer file system features become available.",
        examples: &[
            ex("zfs upgrade -v", "Show versions and their features"),
            ex("zfs upgrade -a", "Upgrade every dataset"),
            ex("zfs upgrade tank/data", "Upgrade one dataset"),
        ],
    },
    RefEntry {
        command: "zpool import",
        syntax: "zpool import [-d dir] [-f] [-o property=value]... [pool_name | pool_id]",
        category: Category::Pool,
        description: "Import a pool that was exported or comes from another system.",
        manpage: "Imports pools listed in the cachefile, or searches the given directories for importable pools.",
        examples: &[
            ex("zpool import", "List pools available for import"),
            ex("zpool import tank", "Import pool \"tank\""),
            ex("zpool import -d /dev/disk/by-id tank", "Import using a device directory"),
        ],
    },
    RefEntry {
        command: "zpool export",
        syntax: "zpool export [-f] pool_name",
        category: Category::Pool,
        description: "Export a pool so it can be imported elsewhere.",
        manpage: "Exports the pools. Devices are marked exported and may be moved between systems, even across endianness.",
        examples: &[
            ex("zpool export tank", "Export pool \"tank\""),
            ex("zpool export -f tank", "Force export even if datasets are busy"),
        ],
    },
    RefEntry {
        command: "zpool clear",
        syntax: "zpool clear pool_name [device]",
        category: Category::Maintenance,
        description: "Clear error counters of a pool or one of its devices.",
        manpage: "Clears device errors in a pool. With no device, all errors in the pool are cleared.",
        examples: &[
            ex("zpool clear tank", "Clear all errors in \"tank\""),
            ex("zpool clear tank /dev/sda", "Clear errors of one device"),
        ],
    },
    RefEntry {
        command: "zfs rename",
        syntax: "zfs rename [-f] old_dataset_name new_dataset_name",
        category: Category::Dataset,
        description: "Rename a dataset or move it within the hierarchy.",
        manpage: "Renames the dataset. When the new name is a descendant path, its parent must already exist.",
        examples: &[
            ex("zfs rename tank/test tank/production", "Rename a dataset"),
            ex("zfs rename tank/www tank/web/server", "Move a dataset"),
        ],
    },
];

/// Entries whose name or description contains `term` (case-insensitive)
/// and whose category matches.
pub fn search(term: &str, category: Category) -> Vec<&'static RefEntry> {
    let needle = term.to_lowercase();
    COMMANDS.iter()
        .filter(|c| {
            c.command.to_lowercase().contains(&needle)
                || c.description.to_lowercase().contains(&needle)
        })
        .filter(|c| category == Category::All || c.category == category)
        .collect()
}
