use coreapi_client::{resolve, NotFoundCause, ResolveError};
use coreapi_document::{Document, Key, KeyPath, Link, Node, Object};
use proptest::prelude::*;

/// One step of a generated path, plus whether a named step's container is a
/// document rather than a plain object
#[derive(Debug, Clone)]
struct Step {
    key: Key,
    container_is_document: bool,
}

fn step() -> impl Strategy<Value = Step> {
    (
        prop_oneof![
            "[a-z]{1,4}".prop_map(Key::Name),
            (0usize..3).prop_map(Key::Index),
        ],
        any::<bool>(),
    )
        .prop_map(|(key, container_is_document)| Step {
            key,
            container_is_document,
        })
}

fn steps() -> impl Strategy<Value = Vec<Step>> {
    ("[a-z]{1,4}", prop::collection::vec(step(), 0..6)).prop_map(|(first, rest)| {
        let mut steps = vec![Step {
            key: Key::Name(first),
            container_is_document: true,
        }];
        steps.extend(rest);
        steps
    })
}

fn wrap(key: &Key, child: Node, as_document: bool, depth: usize) -> Node {
    match key {
        Key::Name(name) => {
            let mut content = Object::new();
            content.insert("other".to_string(), Node::from(1_i64));
            content.insert(name.clone(), child);
            if as_document {
                Node::Document(
                    Document::new(format!("http://example.org/{depth}/")).with_content(content),
                )
            } else {
                Node::Object(content)
            }
        }
        Key::Index(index) => {
            let mut items: Vec<Node> = (0..*index).map(|i| Node::from(i as i64)).collect();
            items.push(child);
            Node::Array(items)
        }
    }
}

/// Build a root document in which `steps` lead to `link`
///
/// Returns the root and the path prefixes that land on documents.
fn build(steps: &[Step], link: &Link) -> (Document, Vec<KeyPath>) {
    let keys: Vec<Key> = steps.iter().map(|s| s.key.clone()).collect();
    let mut node = Node::Link(link.clone());
    let mut document_prefixes = Vec::new();

    // container for step i is the node reached after i keys
    for i in (0..steps.len()).rev() {
        let as_document = i == 0 || steps[i].container_is_document;
        node = wrap(&steps[i].key, node, as_document, i);
        if i > 0 && as_document && matches!(steps[i].key, Key::Name(_)) {
            document_prefixes.push(KeyPath::new(keys[..i].to_vec()));
        }
    }
    document_prefixes.reverse();

    match node {
        Node::Document(root) => (root, document_prefixes),
        other => panic!("root must be a document, got {}", other.type_name()),
    }
}

fn path_of(steps: &[Step]) -> KeyPath {
    steps.iter().map(|s| s.key.clone()).collect()
}

proptest! {
    #[test]
    fn prop_valid_paths_resolve_to_the_link(steps in steps(), action in "[a-z]{3,8}") {
        let link = Link::new("http://target/").with_action(action);
        let (root, document_prefixes) = build(&steps, &link);
        let path = path_of(&steps);

        let (found, ancestors) = resolve(&root, &path).unwrap();
        prop_assert_eq!(&found, &link);

        prop_assert_eq!(&ancestors[0].document, &root);
        prop_assert!(ancestors[0].keys.is_empty());

        let ancestor_keys: Vec<KeyPath> =
            ancestors[1..].iter().map(|a| a.keys.clone()).collect();
        prop_assert_eq!(&ancestor_keys, &document_prefixes);

        // last ancestor is the longest prefix landing on a document
        let last = &ancestors[ancestors.len() - 1];
        prop_assert!(last.keys.is_prefix_of(&path));
        prop_assert!(last.keys.len() < path.len());
        for ancestor in &ancestors {
            let reached = ancestor.keys.iter().try_fold(Node::Document(root.clone()), |node, key| {
                node.index(key).cloned()
            });
            prop_assert_eq!(reached, Ok(Node::Document(ancestor.document.clone())));
        }
    }

    #[test]
    fn prop_missing_final_key_reports_key_and_full_path(steps in steps()) {
        let (root, _) = build(&steps, &Link::new("http://target/"));

        let mut broken = steps.clone();
        let last = broken.len() - 1;
        broken[last].key = match &broken[last].key {
            Key::Name(_) => Key::Name("missing_key".to_string()),
            Key::Index(_) => Key::Index(99),
        };
        let path = path_of(&broken);

        let err = resolve(&root, &path).unwrap_err();
        match err {
            ResolveError::LinkNotFound { path: reported, cause: NotFoundCause::Lookup { key, .. } } => {
                prop_assert_eq!(reported, path);
                prop_assert_eq!(&key, &broken[last].key);
            }
            other => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }

    #[test]
    fn prop_proper_prefixes_are_not_links(steps in steps()) {
        let (root, _) = build(&steps, &Link::new("http://target/"));
        let path = path_of(&steps);

        for len in 0..path.len() {
            let prefix = path.prefix(len);
            let err = resolve(&root, &prefix).unwrap_err();
            let is_not_a_link = matches!(
                err,
                ResolveError::LinkNotFound { cause: NotFoundCause::NotALink { .. }, .. }
            );
            prop_assert!(is_not_a_link);
        }
    }

    #[test]
    fn prop_scalar_keys_are_invalid(value in prop_oneof![
        any::<i64>().prop_map(serde_json::Value::from),
        any::<bool>().prop_map(serde_json::Value::from),
        "[a-z]{0,6}".prop_map(serde_json::Value::from),
    ]) {
        let root = Document::new("http://example.org/").with_entry("next", Link::new("http://x/"));
        let err = resolve(&root, &value).unwrap_err();
        prop_assert!(matches!(err, ResolveError::InvalidKeyPath(_)));
    }
}
