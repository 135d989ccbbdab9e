//! Frame fixtures shared by the integration tests.

/// Build a well-formed Ethernet + IPv4 + TCP frame with the given
/// destination port and `extra_words` 4-byte IP option words (0 = no
/// options). Total length: `14 + 20 + extra_words * 4 + 20` bytes.
pub fn build_tcp_frame(dst_port: u16, extra_words: u8) -> Vec<u8> {
    let ihl = 5 + extra_words;
    let mut frame = Vec::new();
    // Ethernet
    frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 1]); // dst MAC
    frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 2]); // src MAC
    frame.extend_from_slice(&0x0800u16.to_be_bytes()); // EtherType IPv4
    // IPv4
    frame.push(0x40 | ihl); // version 4 + IHL
    frame.push(0); // TOS
    frame.extend_from_slice(&(u16::from(ihl) * 4 + 20).to_be_bytes()); // total length
    frame.extend_from_slice(&[0, 0]); // identification
    frame.extend_from_slice(&[0x40, 0]); // DF flag, fragment offset 0
    frame.push(64); // TTL
    frame.push(6); // protocol: TCP
    frame.extend_from_slice(&[0, 0]); // header checksum (not validated)
    frame.extend_from_slice(&[10, 0, 0, 1]); // src IP
    frame.extend_from_slice(&[10, 0, 0, 2]); // dst IP
    frame.extend(std::iter::repeat(1).take(usize::from(extra_words) * 4)); // IP options (NOPs)
    // TCP
    frame.extend_from_slice(&443u16.to_be_bytes()); // src port
    frame.extend_from_slice(&dst_port.to_be_bytes());
    frame.extend_from_slice(&[0; 8]); // seq + ack
    frame.push(0x50); // data offset 5 words
    frame.push(0x02); // SYN
    frame.extend_from_slice(&0xffffu16.to_be_bytes()); // window
    frame.extend_from_slice(&[0; 4]); // checksum + urgent pointer
    frame
}
