use std::sync::Arc;

use geoflow::{
    CATEGORY_PIPELINE, ConfigRules, Dictionary, DictionaryItem, DocumentKind, FILTER_ALL, GraphDocument, MemDictionary, NodeKind, Point, SeriesFilter, Vars,
    VersionPayload, VersionStatus, WorkbenchBuilder,
};

fn main() {
    let dict = Arc::new(MemDictionary::new());
    dict.set_category(
        CATEGORY_PIPELINE,
        vec![
            DictionaryItem::new("Road Extraction", "road_extraction").with_code("Foundation"),
            DictionaryItem::new("POI Discovery", "poi_discovery").with_code("Location"),
        ],
    );

    let workbench = WorkbenchBuilder::new().dictionary(dict).build().unwrap();
    let store = workbench.store();

    // Build the initial flow
    let mut flow = GraphDocument::new();
    let listener = flow.add_node(NodeKind::Listener, "Tile intake", Vars::new());
    let preprocess = flow.add_node(NodeKind::AiPreprocess, "Segment imagery", Vars::new());
    let task_gen = flow.add_node(NodeKind::TaskGen, "Generate tasks", Vars::new());
    flow.connect(&listener, &preprocess).unwrap();
    flow.connect(&preprocess, &task_gen).unwrap();

    let version = store.create_series(DocumentKind::Flow, "road_extraction", "Road Flow", "ops", "v1.0.0", VersionPayload::Flow(flow)).unwrap();

    for issue in version.payload.as_flow().unwrap().validate(&ConfigRules::default()) {
        println!("Validation issue: {:?}", issue);
    }

    // Fix the task-gen node through an editor session, then deploy
    let mut session = workbench.open(&version.series_id, None).unwrap();
    let mut patch = Vars::new();
    patch.set("sop", "road-annotation-sop-v1");
    session.update_node_config(&task_gen, &patch).unwrap();
    session.commit().unwrap();

    store.set_status(&version.id, VersionStatus::Active).unwrap();

    // Pan and zoom the canvas
    let viewport = session.viewport_mut();
    viewport.begin_drag(Point::new(0.0, 0.0));
    viewport.continue_drag(Point::new(120.0, 40.0));
    viewport.end_drag();
    viewport.zoom_in();
    println!("Viewport: pan {:?}, zoom {}", viewport.pan(), viewport.zoom());

    for row in workbench.summaries(FILTER_ALL, &SeriesFilter::default()).unwrap() {
        println!("{} [{}] {} ({})", row.name, row.classification_label, row.version_label, row.status.as_ref());
    }
}
