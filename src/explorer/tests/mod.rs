//! Integration tests for the explorer module
//!
//! Tests the exploration pipeline against small sample data trees.

pub mod basic_exploration;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a sample data tree with one file per separator
pub fn create_sample_tree(temp_dir: &TempDir) -> PathBuf {
    let root = temp_dir.path().join("data");
    let nested = root.join("uci").join("wine");
    fs::create_dir_all(&nested).unwrap();

    fs::write(
        root.join("iris.csv"),
        "sepal_length,sepal_width,petal_length,petal_width,class\n\
         5.1,3.5,1.4,0.2,Iris-setosa\n\
         4.9,3.0,1.4,0.2,Iris-setosa\n\
         6.3,3.3,6.0,2.5,Iris-virginica\n",
    )
    .unwrap();

    fs::write(
        nested.join("wine_quality.csv"),
        "fixed acidity;volatile acidity;alcohol;quality\n\
         7.4;0.7;9.4;5\n\
         7.8;0.88;9.8;5\n\
         11.2;0.28;9.8;6\n\
         7.4;0.66;9.4;5\n",
    )
    .unwrap();

    fs::write(
        root.join("cars.tab"),
        "buying\tmaint\tdoors\tclass\nvhigh\tvhigh\t2\tunacc\nlow\tlow\t5more\tgood\n",
    )
    .unwrap();

    fs::write(
        root.join("uci").join("orders.dat"),
        "id|customer|total\n1|Acme, Inc.|10.5\n2|Foo Bar|7\n3|Baz, Qux and Sons|12\n",
    )
    .unwrap();

    fs::write(root.join("header_only.txt"), "a,b,c\n").unwrap();
    fs::write(root.join("config.json"), "{\"key\": [1, 2, 3]}").unwrap();
    fs::write(root.join("workbook.xlsx"), [0x50u8, 0x4b, 0x03, 0x04]).unwrap();
    fs::write(root.join("README.md"), "# sample data").unwrap();

    root
}
