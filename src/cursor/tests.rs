use super::*;

#[test]
fn slice_cursor_reads_and_seeks() {
    let data = [1u8, 2, 3, 4, 5];
    let mut cur = SliceCursor::new(&data);
    assert_eq!(cur.tell().unwrap(), 0);

    let mut buf = [0u8; 2];
    cur.read_exact(&mut buf).unwrap();
    assert_eq!(buf, [1, 2]);
    assert_eq!(cur.tell().unwrap(), 2);

    cur.seek(4).unwrap();
    let mut one = [0u8; 1];
    cur.read_exact(&mut one).unwrap();
    assert_eq!(one, [5]);
}

#[test]
fn slice_cursor_rejects_writes() {
    let data = [0u8; 4];
    let mut cur = SliceCursor::new(&data);
    assert!(!cur.writable());
    assert!(cur.write(&[1]).is_err());
}

#[test]
fn vec_cursor_round_trips() {
    let mut cur = VecCursor::new();
    cur.write(&[10, 20, 30]).unwrap();
    assert_eq!(cur.tell().unwrap(), 3);
    cur.seek(0).unwrap();
    let mut buf = [0u8; 3];
    cur.read_exact(&mut buf).unwrap();
    assert_eq!(buf, [10, 20, 30]);
    assert_eq!(cur.into_inner(), vec![10, 20, 30]);
}

#[test]
fn read_exact_reports_unexpected_eof() {
    let data = [1u8, 2];
    let mut cur = SliceCursor::new(&data);
    let mut buf = [0u8; 5];
    let err = cur.read_exact(&mut buf).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

#[test]
fn sub_cursor_translates_positions() {
    let data = [0u8, 1, 2, 3, 4, 5, 6, 7];
    let mut parent = SliceCursor::new(&data);
    parent.seek(3).unwrap();
    {
        let mut sub = SubCursor::new(&mut parent, 3);
        assert_eq!(sub.tell().unwrap(), 0);
        let mut buf = [0u8; 2];
        sub.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [3, 4]);
        assert_eq!(sub.tell().unwrap(), 2);

        sub.seek(0).unwrap();
        assert_eq!(sub.tell().unwrap(), 0);
    }
    // Parent observes the absolute position the sub-cursor left it at.
    assert_eq!(parent.tell().unwrap(), 3);
}

#[test]
fn sub_cursor_does_not_bound_the_window_top() {
    let data = [0u8; 4];
    let mut parent = SliceCursor::new(&data);
    let mut sub = SubCursor::new(&mut parent, 2);
    // Reading past the logical window is the inner codec's problem, not the
    // sub-cursor's: it must not artificially truncate.
    let mut buf = [0u8; 4];
    let n = sub.read(&mut buf).unwrap();
    assert_eq!(n, 2);
}
