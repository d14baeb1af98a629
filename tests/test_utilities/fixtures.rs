use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const GRAPH_FILE: &str = "graph.json";

const GRAPH_JSON: &str = r#"{
    "packs": [
        {"id": "HelloWorld", "path": "Packs/HelloWorld"},
        {"id": "Base", "path": "Packs/Base", "metadata": {"name": "Base", "marketplaces": ["xsoar", "marketplacev2"]}}
    ],
    "items": [
        {"content_type": "Integration", "object_id": "HelloIntegration", "path": "Packs/HelloWorld/Integrations/HelloIntegration/HelloIntegration.yml", "marketplaces": ["xsoar", "marketplacev2"], "fromversion": "6.5.0"},
        {"content_type": "Script", "object_id": "HelloScript", "path": "Packs/HelloWorld/Scripts/HelloScript/HelloScript.yml", "marketplaces": ["xsoar", "marketplacev2"]},
        {"content_type": "ParsingRule", "object_id": "HelloParsingRule", "path": "Packs/HelloWorld/ParsingRules/HelloParsingRule/HelloParsingRule.yml", "marketplaces": ["marketplacev2"]},
        {"content_type": "TestPlaybook", "object_id": "HelloTest", "path": "Packs/HelloWorld/TestPlaybooks/HelloTest.yml", "marketplaces": ["xsoar", "marketplacev2"], "is_test": true}
    ],
    "relationships": [
        {"kind": "IN_PACK", "source": {"content_type": "Integration", "object_id": "HelloIntegration"}, "target": {"content_type": "Pack", "object_id": "HelloWorld"}},
        {"kind": "IN_PACK", "source": {"content_type": "Script", "object_id": "HelloScript"}, "target": {"content_type": "Pack", "object_id": "HelloWorld"}},
        {"kind": "IN_PACK", "source": {"content_type": "ParsingRule", "object_id": "HelloParsingRule"}, "target": {"content_type": "Pack", "object_id": "HelloWorld"}},
        {"kind": "IN_PACK", "source": {"content_type": "TestPlaybook", "object_id": "HelloTest"}, "target": {"content_type": "Pack", "object_id": "HelloWorld"}},
        {"kind": "IMPORTS", "source": {"content_type": "Integration", "object_id": "HelloIntegration"}, "target": {"content_type": "Script", "object_id": "HelloScript"}},
        {"kind": "DEPENDS_ON", "source": {"content_type": "Pack", "object_id": "HelloWorld"}, "target": {"content_type": "Pack", "object_id": "Base"}, "mandatorily": true}
    ]
}"#;

/// A content repository checkout with a graph export at its root
pub struct ContentRepo {
    pub dir: TempDir,
}

impl ContentRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Self { dir };

        repo.write(
            "Packs/HelloWorld/pack_metadata.json",
            r#"{"name": "Hello World", "description": "Says hello", "author": "Cortex XSOAR", "currentVersion": "1.0.1", "marketplaces": ["xsoar", "marketplacev2"]}"#,
        );
        repo.write(
            "Packs/HelloWorld/README.md",
            "# Hello World\n<~XSOAR>\nWorks with Cortex XSOAR.\n</~XSOAR>\n",
        );
        repo.write("Packs/HelloWorld/ReleaseNotes/1_0_1.md", "Fixed greeting.\n");
        repo.write(
            "Packs/HelloWorld/Integrations/HelloIntegration/HelloIntegration.yml",
            "commonfields:\n  id: HelloIntegration\nname: HelloIntegration\nfromversion: 6.5.0\n",
        );
        repo.write(
            "Packs/HelloWorld/Scripts/HelloScript/HelloScript.yml",
            "commonfields:\n  id: HelloScript\nname: HelloScript\ncomment: Runs on Cortex XSOAR\n",
        );
        repo.write(
            "Packs/HelloWorld/ParsingRules/HelloParsingRule/HelloParsingRule.yml",
            "id: HelloParsingRule\nname: HelloParsingRule\n",
        );
        repo.write(
            "Packs/HelloWorld/TestPlaybooks/HelloTest.yml",
            "id: HelloTest\nname: HelloTest\n",
        );
        fs::create_dir_all(repo.root().join("Packs/Base")).unwrap();
        repo.write(GRAPH_FILE, GRAPH_JSON);
        repo
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn graph_path(&self) -> PathBuf {
        self.root().join(GRAPH_FILE)
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }
}
