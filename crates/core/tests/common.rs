#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use navjson_core::{
    LinkKind, Metadata, NavFile, NavJsonFile, NavJsonVersion, NavLink, NavNode, NavVersion,
    NavigationGraph, Terminal, Traversal,
};

/// Terminal fed from a fixed key sequence, capturing everything written to it.
#[derive(Default)]
pub struct ScriptedTerminal {
    keys: VecDeque<char>,
    pub keys_read: usize,
    pub messages: Vec<u8>,
    pub output: Vec<u8>,
}

impl ScriptedTerminal {
    pub fn with_keys(keys: &str) -> Self {
        Self {
            keys: keys.chars().collect(),
            ..Self::default()
        }
    }

    pub fn messages_text(&self) -> String {
        String::from_utf8_lossy(&self.messages).into_owned()
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Terminal for ScriptedTerminal {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        let key = self.keys.pop_front();
        if key.is_some() {
            self.keys_read += 1;
        }
        Ok(key)
    }

    fn messages(&mut self) -> &mut dyn Write {
        &mut self.messages
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}

/// Terminal whose message stream rejects every write, as a closed pipe would.
pub struct ClosedMessagesTerminal {
    pub inner: ScriptedTerminal,
    closed: ClosedPipe,
}

impl ClosedMessagesTerminal {
    pub fn with_keys(keys: &str) -> Self {
        Self {
            inner: ScriptedTerminal::with_keys(keys),
            closed: ClosedPipe,
        }
    }
}

impl Terminal for ClosedMessagesTerminal {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        self.inner.read_key()
    }

    fn messages(&mut self) -> &mut dyn Write {
        &mut self.closed
    }

    fn output(&mut self) -> &mut dyn Write {
        self.inner.output()
    }
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "messages closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "messages closed"))
    }
}

/// Three nodes exercising every field the newest versions can carry.
pub fn arena_graph() -> NavigationGraph {
    let mut spawn = NavNode::new([0.0, 0.0, 24.0]);
    spawn.flags = 0x02;
    spawn.radius = 24;
    spawn.links.push(NavLink::walk(1));
    spawn.links.push(NavLink {
        target: 2,
        kind: LinkKind::BarrierJump,
        traversal: Some(Traversal {
            funnel: [16.0, 0.0, 24.0],
            start: [16.0, 0.0, 24.0],
            end: [192.0, 64.0, 88.0],
            ladder_plane: [0.0, 0.0, 0.0],
        }),
    });
    let mut corridor = NavNode::new([128.0, 0.0, 24.0]);
    corridor.links.push(NavLink::walk(0));
    corridor.links.push(NavLink::walk(2));
    let mut ledge = NavNode::new([192.0, 64.0, 88.0]);
    ledge.links.push(NavLink {
        target: 1,
        kind: LinkKind::WalkOffLedge,
        traversal: None,
    });
    NavigationGraph::new(vec![spawn, corridor, ledge])
}

pub fn write_nav(path: &Path, graph: &NavigationGraph, version: NavVersion) {
    let bytes = NavFile::from_graph(graph, version)
        .expect("encode nav")
        .to_binary()
        .expect("serialize nav");
    fs::write(path, bytes).expect("write nav fixture");
}

pub fn write_navjson(
    path: &Path,
    graph: &NavigationGraph,
    metadata: &Metadata,
    version: NavJsonVersion,
) {
    let text = NavJsonFile::from_graph(graph, metadata, version)
        .expect("encode navjson")
        .to_json()
        .expect("serialize navjson");
    fs::write(path, text).expect("write navjson fixture");
}

pub fn read_navjson(path: &Path) -> NavJsonFile {
    let text = fs::read_to_string(path).expect("read navjson");
    NavJsonFile::from_json(&text).expect("parse navjson")
}

pub fn read_nav(path: &Path) -> NavFile {
    let bytes = fs::read(path).expect("read nav");
    NavFile::from_binary(&bytes).expect("parse nav")
}

/// Sorted file names in `dir`.
pub fn dir_listing(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .collect();
    entries.sort();
    entries
}
